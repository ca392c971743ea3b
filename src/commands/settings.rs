//! Settings Commands
//!
//! Settings snapshot queries and partial writes. Writes send only the
//! changed keys; the host merges them.

use serde::Serialize;
use serde_json::Value;

use super::{call, query, send, BridgeError};
use crate::models::PetState;
use crate::settings::SettingsMap;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct ValuesArgs<'a> {
    values: &'a SettingsMap,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FavorArgs {
    delta: i64,
}

// ========================
// Commands
// ========================

pub async fn get_initial_state() -> Result<PetState, BridgeError> {
    query("get_initial_state").await
}

pub async fn get_settings() -> Result<SettingsMap, BridgeError> {
    let value: Value = query("get_settings").await?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(SettingsMap::new()),
        other => Err(BridgeError::Serde(format!("settings is not an object: {}", other))),
    }
}

pub async fn set_settings(values: &SettingsMap) -> Result<(), BridgeError> {
    send("set_settings", &ValuesArgs { values }).await
}

pub async fn set_ai_settings(values: &SettingsMap) -> Result<(), BridgeError> {
    send("set_ai_settings", &ValuesArgs { values }).await
}

pub async fn set_reminder_settings(values: &SettingsMap) -> Result<(), BridgeError> {
    send("set_reminder_settings", &ValuesArgs { values }).await
}

pub async fn get_favor() -> Result<i64, BridgeError> {
    let value: Value = query("get_favor").await?;
    value
        .as_f64()
        .map(|v| v as i64)
        .ok_or_else(|| BridgeError::Serde(format!("favor is not a number: {}", value)))
}

/// Returns the new favor when the host reports it
pub async fn add_favor(delta: i64) -> Result<Option<i64>, BridgeError> {
    let value: Value = call("add_favor", &FavorArgs { delta }).await?;
    Ok(value.as_f64().map(|v| v as i64))
}

pub async fn test_ai_connection() -> Result<(), BridgeError> {
    super::send_empty("test_ai_connection").await
}
