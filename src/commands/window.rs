//! Window Commands
//!
//! The host owns window placement; the page only reports drag gestures
//! in screen coordinates.

use serde::Serialize;

use super::{send, send_empty, BridgeError};

// ========================
// Types
// ========================

#[derive(Serialize)]
struct PointArgs {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct EnabledArgs {
    enabled: bool,
}

// ========================
// Commands
// ========================

pub async fn start_window_drag(x: f64, y: f64) -> Result<(), BridgeError> {
    send("start_window_drag", &PointArgs { x, y }).await
}

pub async fn move_window_drag(x: f64, y: f64) -> Result<(), BridgeError> {
    send("move_window_drag", &PointArgs { x, y }).await
}

pub async fn end_window_drag() -> Result<(), BridgeError> {
    send_empty("end_window_drag").await
}

/// Whether the host may start native window drags on its own
pub async fn set_window_drag_enabled(enabled: bool) -> Result<(), BridgeError> {
    send("set_window_drag_enabled", &EnabledArgs { enabled }).await
}

pub async fn toggle_pet_window() -> Result<(), BridgeError> {
    send_empty("toggle_pet_window").await
}

/// Host-side dialog with the full AI configuration
pub async fn open_ai_detail_dialog() -> Result<(), BridgeError> {
    send_empty("open_ai_detail_dialog").await
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;

    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn window_commands_without_host_are_soft() {
        let detail = open_ai_detail_dialog().await;
        assert_eq!(detail, Err(BridgeError::Unavailable));
        assert!(toggle_pet_window().await.is_err_and(|err| err.is_soft()));
    }
}
