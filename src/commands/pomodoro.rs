//! Pomodoro Commands
//!
//! The host runs the timer; these only start, pause and stop it.

use serde::Serialize;

use super::{send, send_empty, BridgeError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DurationsArgs {
    focus_min: u32,
    break_min: u32,
}

pub async fn set_pomodoro_durations(focus_min: u32, break_min: u32) -> Result<(), BridgeError> {
    send("set_pomodoro_durations", &DurationsArgs { focus_min, break_min }).await
}

pub async fn start_pomodoro() -> Result<(), BridgeError> {
    send_empty("start_pomodoro").await
}

pub async fn pause_pomodoro() -> Result<(), BridgeError> {
    send_empty("pause_pomodoro").await
}

pub async fn stop_pomodoro() -> Result<(), BridgeError> {
    send_empty("stop_pomodoro").await
}
