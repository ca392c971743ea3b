//! Speech Bubble Component
//!
//! Shows the current bubble text above the avatar's head.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn SpeechBubble() -> impl IntoView {
    let ctx = use_app_context();

    let style = move || {
        // Track the text so the anchor is recomputed for each message
        let _ = ctx.bubble.with(|b| b.is_some());
        match ctx.avatar.with_value(|a| a.head_anchor()) {
            Some((x, y)) => format!("left: {}px; top: {}px;", x, y),
            None => String::new(),
        }
    };

    view! {
        <div class="speech-bubble" class:show=move || ctx.bubble.with(|b| b.is_some()) style=style>
            {move || ctx.bubble.get().unwrap_or_default()}
        </div>
    }
}
