//! Host Command Wrappers
//!
//! Frontend bindings to host commands and push events, organized by domain.
//! Every wrapper checks for the bridge first, so a page opened outside the
//! host degrades to no-ops instead of throwing.

mod chat;
mod clipboard;
mod events;
mod launchers;
mod model;
mod notes;
mod plugins;
mod pomodoro;
mod settings;
mod todos;
mod window;

use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "event"])]
    async fn listen(event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> Result<JsValue, JsValue>;
}

// Re-export all public items
pub use chat::*;
pub use clipboard::*;
pub use events::*;
pub use launchers::*;
pub use model::*;
pub use notes::*;
pub use plugins::*;
pub use pomodoro::*;
pub use settings::*;
pub use todos::*;
pub use window::*;

/// Bridge acquisition re-poll
const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_DELAY_MS: u32 = 500;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    #[error("host bridge unavailable")]
    Unavailable,
    #[error("host does not support `{0}`")]
    Unsupported(String),
    #[error("`{cmd}` failed: {message}")]
    Host { cmd: String, message: String },
    #[error("payload conversion failed: {0}")]
    Serde(String),
}

impl BridgeError {
    /// Missing bridge or capability; callers treat these as no-ops
    pub fn is_soft(&self) -> bool {
        matches!(self, BridgeError::Unavailable | BridgeError::Unsupported(_))
    }
}

impl From<serde_wasm_bindgen::Error> for BridgeError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        BridgeError::Serde(err.to_string())
    }
}

/// Proof that the host bridge is present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bridge;

impl Bridge {
    /// Check once for `window.__TAURI__.core.invoke`
    pub fn detect() -> Option<Bridge> {
        let window: JsValue = web_sys::window()?.into();
        let invoke = ["__TAURI__", "core", "invoke"]
            .iter()
            .try_fold(window, |value, key| {
                js_sys::Reflect::get(&value, &JsValue::from_str(key))
                    .ok()
                    .filter(|v| !v.is_undefined() && !v.is_null())
            })?;
        invoke.is_function().then_some(Bridge)
    }

    /// Wait for the bridge, polling a bounded number of times
    pub async fn connect() -> Option<Bridge> {
        for attempt in 1..=CONNECT_ATTEMPTS {
            if let Some(bridge) = Bridge::detect() {
                log::info!("host bridge ready after {} attempt(s)", attempt);
                return Some(bridge);
            }
            if attempt < CONNECT_ATTEMPTS {
                TimeoutFuture::new(CONNECT_DELAY_MS).await;
            }
        }
        log::warn!("host bridge not found; running without host");
        None
    }
}

/// Host rejection text for an unknown command contains one of these
fn is_unsupported_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["not found", "unknown command", "not allowed", "not supported"]
        .iter()
        .any(|needle| lower.contains(needle))
}

fn classify_rejection(cmd: &str, message: String) -> BridgeError {
    if is_unsupported_message(&message) {
        BridgeError::Unsupported(cmd.to_string())
    } else {
        BridgeError::Host { cmd: cmd.to_string(), message }
    }
}

fn rejection_text(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

/// Maps stay plain objects on the JS side
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, BridgeError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}

async fn call_raw(cmd: &str, args: JsValue) -> Result<JsValue, BridgeError> {
    Bridge::detect().ok_or(BridgeError::Unavailable)?;
    invoke(cmd, args).await.map_err(|err| {
        let error = classify_rejection(cmd, rejection_text(&err));
        if error.is_soft() {
            log::debug!("{}", error);
        }
        error
    })
}

/// Invoke a command with serialized args and decode its reply
async fn call<A, R>(cmd: &str, args: &A) -> Result<R, BridgeError>
where
    A: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let result = call_raw(cmd, to_js(args)?).await?;
    Ok(serde_wasm_bindgen::from_value(result)?)
}

/// Invoke a command without args
async fn query<R: DeserializeOwned>(cmd: &str) -> Result<R, BridgeError> {
    let result = call_raw(cmd, JsValue::NULL).await?;
    Ok(serde_wasm_bindgen::from_value(result)?)
}

/// Invoke a command and ignore whatever it returns
async fn send<A: Serialize + ?Sized>(cmd: &str, args: &A) -> Result<(), BridgeError> {
    call_raw(cmd, to_js(args)?).await.map(|_| ())
}

async fn send_empty(cmd: &str) -> Result<(), BridgeError> {
    call_raw(cmd, JsValue::NULL).await.map(|_| ())
}

/// Log a failed fire-and-forget command; soft failures only at debug
pub fn report(context: &str, result: Result<(), BridgeError>) {
    match result {
        Ok(()) => {}
        Err(err) if err.is_soft() => log::debug!("{}: {}", context, err),
        Err(err) => log::warn!("{}: {}", context, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_is_unsupported() {
        let err = classify_rejection("reload_plugins", "Command reload_plugins not found".to_string());
        assert_eq!(err, BridgeError::Unsupported("reload_plugins".to_string()));
        assert!(err.is_soft());
    }

    #[test]
    fn test_other_rejections_are_host_errors() {
        let err = classify_rejection("add_todo", "database is locked".to_string());
        assert_eq!(
            err,
            BridgeError::Host { cmd: "add_todo".to_string(), message: "database is locked".to_string() }
        );
        assert!(!err.is_soft());
        assert_eq!(err.to_string(), "`add_todo` failed: database is locked");
    }

    #[test]
    fn test_unavailable_is_soft() {
        assert!(BridgeError::Unavailable.is_soft());
        assert!(!BridgeError::Serde("bad".into()).is_soft());
    }
}
