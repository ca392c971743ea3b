//! Quick Toolbar Component
//!
//! Small floating button strip. Draggable, and hides itself after a
//! short idle period.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_floating::{bind_global_listeners, create_floating_signals, make_on_mousedown};

use crate::commands;
use crate::context::{use_app_context, AppContext};
use crate::interaction::{Blocker, DragKind};
use crate::panels::PanelId;

const HIDE_AFTER_SHOW_MS: u32 = 2_500;
const HIDE_AFTER_LEAVE_MS: u32 = 1_200;

/// Hide or show the pet window; without host support the chat panel
/// toggles instead
fn toggle_pet_window(ctx: AppContext) {
    spawn_local(async move {
        match commands::toggle_pet_window().await {
            Err(err) if err.is_soft() => ctx.chat_hidden.update(|hidden| *hidden = !*hidden),
            result => commands::report("toggle pet window", result),
        }
    });
}

#[component]
pub fn QuickToolbar() -> impl IntoView {
    let ctx = use_app_context();
    let hidden = RwSignal::new(false);
    let hide_timer = StoredValue::new_local(None::<Timeout>);
    let floating = create_floating_signals();
    let toolbar_ref = NodeRef::<leptos::html::Div>::new();

    let schedule_hide = move |delay_ms: u32| {
        let timeout = Timeout::new(delay_ms, move || hidden.set(true));
        hide_timer.set_value(Some(timeout));
    };
    let show = move || {
        hidden.set(false);
        schedule_hide(HIDE_AFTER_SHOW_MS);
    };
    show();

    let arbiter = ctx.arbiter;
    bind_global_listeners(floating, move || {
        arbiter.update_value(|a| {
            a.end(DragKind::Floating);
        });
    });
    let on_mousedown = make_on_mousedown(
        floating,
        move || toolbar_ref.get_untracked().map(Into::into),
        move || {
            !ctx.gate.get_untracked().move_mode()
                && arbiter.try_update_value(|a| a.try_begin(DragKind::Floating)).unwrap_or(false)
        },
    );

    view! {
        <div
            node_ref=toolbar_ref
            class="quick-toolbar"
            class:hidden=move || hidden.get()
            style=move || floating.style()
            on:mousedown=on_mousedown
            on:mouseenter=move |_| {
                show();
                ctx.set_blocker(Blocker::Ui, true);
            }
            on:mouseleave=move |_| {
                schedule_hide(HIDE_AFTER_LEAVE_MS);
                ctx.set_blocker(Blocker::Ui, false);
            }
        >
            <button title="显示/隐藏宠物" on:click=move |_| toggle_pet_window(ctx)>"👁"</button>
            <button title="便签" on:click=move |_| ctx.toggle_panel(PanelId::Note)>"📝"</button>
            <button title="番茄钟" on:click=move |_| ctx.toggle_panel(PanelId::Pomodoro)>"🍅"</button>
            <button title="设置" on:click=move |_| ctx.toggle_panel(PanelId::Settings)>"⚙"</button>
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
    async fn pet_toggle_without_host_toggles_chat() {
        let owner = Owner::new();
        let ctx = owner.with(|| AppContext::new(Store::new(AppState::default())));

        toggle_pet_window(ctx);
        TimeoutFuture::new(20).await;
        assert!(ctx.chat_hidden.get_untracked());

        toggle_pet_window(ctx);
        TimeoutFuture::new(20).await;
        assert!(!ctx.chat_hidden.get_untracked());
    }
}
