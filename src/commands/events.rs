//! Host Push Events
//!
//! Subscriptions to events the host emits. Handlers receive the decoded
//! `event.payload`; undecodable payloads are logged and skipped.

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::{listen, Bridge};

// ========================
// Event Names
// ========================

pub const STATE_UPDATED: &str = "state-updated";
pub const SETTINGS_UPDATED: &str = "settings-updated";
pub const REMINDERS_UPDATED: &str = "reminders-updated";
pub const TODOS_UPDATED: &str = "todos-updated";
pub const CLIPBOARD_UPDATED: &str = "clipboard-updated";
pub const SYSTEM_INFO_UPDATED: &str = "system-info-updated";
pub const NOTE_UPDATED: &str = "note-updated";
pub const POMODORO_UPDATED: &str = "pomodoro-updated";
pub const FAVOR_UPDATED: &str = "favor-updated";
pub const AI_TEST_RESULT: &str = "ai-test-result";
pub const PASSIVE_MESSAGE: &str = "passive-message";
pub const BINDING_PREVIEW: &str = "binding-preview";
pub const BINDINGS_UPDATED: &str = "bindings-updated";
pub const LAUNCHERS_UPDATED: &str = "launchers-updated";
pub const PLUGINS_UPDATED: &str = "plugins-updated";
pub const OPEN_PANEL: &str = "open-panel";
pub const MODEL_EDIT_MODE_CHANGED: &str = "model-edit-mode-changed";
pub const AI_REPLY: &str = "ai-reply";

fn payload(event: &JsValue) -> JsValue {
    js_sys::Reflect::get(event, &JsValue::from_str("payload")).unwrap_or(JsValue::NULL)
}

/// Subscribe for the lifetime of the page
pub fn subscribe<T, F>(_bridge: Bridge, event: &'static str, mut handler: F)
where
    T: DeserializeOwned + 'static,
    F: FnMut(T) + 'static,
{
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |raw: JsValue| {
        match serde_wasm_bindgen::from_value::<T>(payload(&raw)) {
            Ok(value) => handler(value),
            Err(err) => log::warn!("dropping malformed `{}` payload: {}", event, err),
        }
    });
    spawn_local(async move {
        match listen(event, &closure).await {
            Ok(_) => closure.forget(),
            Err(err) => log::debug!("listen `{}` failed: {:?}", event, err),
        }
    });
}
