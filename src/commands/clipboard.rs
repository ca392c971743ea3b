//! Clipboard Commands
//!
//! Frontend wrappers for the host's clipboard history.

use serde::Serialize;

use super::{query, send, send_empty, BridgeError};
use crate::models::ClipboardItem;

#[derive(Serialize)]
struct ClipboardTextArgs<'a> {
    text: &'a str,
}

pub async fn get_clipboard_history() -> Result<Vec<ClipboardItem>, BridgeError> {
    let items: Option<Vec<ClipboardItem>> = query("get_clipboard_history").await?;
    Ok(items.unwrap_or_default())
}

/// Put a history entry back on the system clipboard
pub async fn set_clipboard_text(text: &str) -> Result<(), BridgeError> {
    send("set_clipboard_text", &ClipboardTextArgs { text }).await
}

pub async fn clear_clipboard() -> Result<(), BridgeError> {
    send_empty("clear_clipboard").await
}
