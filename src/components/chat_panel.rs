//! Chat Panel Component
//!
//! Collapsible chat log with input, favor display, gift/reset buttons and
//! the move-mode / model-edit toggles.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{use_app_context, AppContext};
use crate::format::favor_label;
use crate::interaction::Blocker;
use crate::models::ChatRole;
use crate::panels::PanelId;
use crate::store::{store_push_chat, store_set_favor, AppStateStoreFields};

/// Send `delta` and mirror the host's answer into the settings cache.
/// `on_applied` runs only once the host took the change.
fn change_favor(ctx: AppContext, delta: i64, on_applied: impl FnOnce() + 'static) {
    spawn_local(async move {
        match commands::add_favor(delta).await {
            Ok(favor) => {
                if let Some(favor) = favor {
                    store_set_favor(&ctx.store, favor);
                }
                on_applied();
            }
            Err(err) => commands::report("add favor", Err(err)),
        }
    });
}

fn send_gift(ctx: AppContext) {
    change_favor(ctx, 5, move || ctx.log_status("收到啦！谢谢你～"));
}

fn reset_favor(ctx: AppContext) {
    let favor = ctx.store.settings().with_untracked(|s| s.favor());
    change_favor(ctx, -favor, move || ctx.show_bubble("好感度已重置"));
}

#[component]
pub fn ChatPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let (draft, set_draft) = signal(String::new());
    let log_ref = NodeRef::<leptos::html::Div>::new();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let send = move || {
        let text = draft.get_untracked().trim().to_string();
        if text.is_empty() {
            return;
        }
        set_draft.set(String::new());
        store_push_chat(&store, ChatRole::User, text.clone());
        change_favor(ctx, 1, || {});
        spawn_local(async move {
            commands::report("send message", commands::send_user_message(&text).await);
        });
    };

    // Keep the newest line in view
    Effect::new(move |_| {
        let _ = store.chat().with(|c| c.len());
        if let Some(log) = log_ref.get() {
            log.set_scroll_top(log.scroll_height());
        }
    });

    let favor = move || store.settings().with(|s| s.favor());

    let toggle_collapsed = move |_| {
        let collapsed = !ctx.chat_collapsed.get_untracked();
        ctx.chat_collapsed.set(collapsed);
        if !collapsed {
            if let Some(input) = input_ref.get_untracked() {
                let _ = input.focus();
            }
        }
    };

    view! {
        <div
            id="chat-panel"
            class="chat-panel"
            class:collapsed=move || ctx.chat_collapsed.get()
            class:hidden=move || ctx.chat_hidden.get()
            on:mouseenter=move |_| ctx.set_blocker(Blocker::Ui, true)
            on:mouseleave=move |_| ctx.set_blocker(Blocker::Ui, false)
        >
            <div class="chat-handle" on:click=toggle_collapsed>
                <span class="favor-label">{move || favor_label(favor())}</span>
                <span class="hint">
                    {move || if ctx.chat_collapsed.get() { "点击展开" } else { "点击收起" }}
                </span>
            </div>
            <div class="chat-log" node_ref=log_ref>
                <For
                    each=move || store.chat().get()
                    key=|msg| msg.id
                    children=move |msg| {
                        view! { <div class=format!("msg {}", msg.role.class())>{msg.text}</div> }
                    }
                />
            </div>
            <div class="chat-input-row">
                <input
                    node_ref=input_ref
                    type="text"
                    placeholder="和我聊聊吧…"
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            send();
                        }
                    }
                    on:focus=move |_| ctx.set_blocker(Blocker::Ui, true)
                    on:blur=move |_| ctx.set_blocker(Blocker::Ui, false)
                />
                <button on:click=move |_| send()>"发送"</button>
            </div>
            <div class="chat-actions">
                <button
                    class:active=move || ctx.gate.with(|g| g.move_mode())
                    on:click=move |_| ctx.set_move_mode(!ctx.gate.get_untracked().move_mode())
                >
                    {move || if ctx.gate.with(|g| g.move_mode()) { "退出移动" } else { "移动窗口" }}
                </button>
                <button
                    class:active=move || ctx.model_edit_mode.get()
                    on:click=move |_| ctx.model_edit_mode.update(|on| *on = !*on)
                >
                    "调整模型"
                </button>
                <button on:click=move |_| ctx.toggle_panel(PanelId::Settings)>"设置"</button>
                <button on:click=move |_| send_gift(ctx)>"送礼物"</button>
                <button on:click=move |_| reset_favor(ctx)>"重置好感"</button>
            </div>
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::store::AppState;

    use gloo_timers::future::TimeoutFuture;
    use reactive_stores::Store;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn gift_without_host_logs_nothing() {
        let owner = Owner::new();
        let ctx = owner.with(|| AppContext::new(Store::new(AppState::default())));

        send_gift(ctx);
        reset_favor(ctx);
        TimeoutFuture::new(20).await;

        assert!(ctx.store.chat().get_untracked().is_empty());
        assert_eq!(ctx.bubble.get_untracked(), None);
        assert_eq!(ctx.store.settings().with_untracked(|s| s.favor()), 50);
    }
}
