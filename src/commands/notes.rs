//! Note Commands

use serde::Serialize;
use serde_json::Value;

use super::{query, send, BridgeError};

#[derive(Serialize)]
struct NoteArgs<'a> {
    text: &'a str,
}

pub async fn get_note() -> Result<String, BridgeError> {
    let value: Value = query("get_note").await?;
    Ok(value.as_str().unwrap_or_default().to_string())
}

pub async fn set_note(text: &str) -> Result<(), BridgeError> {
    send("set_note", &NoteArgs { text }).await
}
