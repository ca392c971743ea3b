//! Chat Commands

use serde::Serialize;

use super::{send, BridgeError};

#[derive(Serialize)]
struct MessageArgs<'a> {
    text: &'a str,
}

/// The reply arrives later as an `ai-reply` event
pub async fn send_user_message(text: &str) -> Result<(), BridgeError> {
    send("send_user_message", &MessageArgs { text }).await
}
