//! Tool Panel Frame
//!
//! Floating panel shell: draggable title bar, close button, and the
//! UI drag blocker while the pointer is over it. All panels stay mounted;
//! only the visible one carries the `visible` class.

use leptos::prelude::*;
use leptos_floating::{bind_global_listeners, create_floating_signals, make_on_mousedown};

use crate::context::use_app_context;
use crate::interaction::{Blocker, DragKind};
use crate::panels::PanelId;

#[component]
pub fn ToolPanel(
    id: PanelId,
    /// Extra class for panel-specific sizing
    #[prop(optional, into)]
    class: String,
    children: Children,
) -> impl IntoView {
    let ctx = use_app_context();
    let floating = create_floating_signals();
    let panel_ref = NodeRef::<leptos::html::Div>::new();

    let arbiter = ctx.arbiter;
    bind_global_listeners(floating, move || {
        arbiter.update_value(|a| {
            a.end(DragKind::Floating);
        });
    });

    let on_title_mousedown = make_on_mousedown(
        floating,
        move || panel_ref.get_untracked().map(Into::into),
        move || {
            !ctx.gate.get_untracked().move_mode()
                && arbiter.try_update_value(|a| a.try_begin(DragKind::Floating)).unwrap_or(false)
        },
    );

    let panel_class = move || {
        let mut classes = format!("tool-panel {}", class);
        if ctx.panels.with(|p| p.is_visible(id)) {
            classes.push_str(" visible");
        }
        if floating.is_dragging() {
            classes.push_str(" dragging");
        }
        classes
    };

    view! {
        <div
            node_ref=panel_ref
            id=id.name()
            class=panel_class
            style=move || floating.style()
            on:mouseenter=move |_| ctx.set_blocker(Blocker::Ui, true)
            on:mouseleave=move |_| ctx.set_blocker(Blocker::Ui, false)
            on:contextmenu=move |ev| ev.stop_propagation()
        >
            <div class="panel-title" on:mousedown=on_title_mousedown>
                <span>{id.title()}</span>
                <button
                    class="panel-close"
                    title="关闭"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        ctx.close_panel(id);
                    }
                >
                    "×"
                </button>
            </div>
            <div class="panel-body">{children()}</div>
        </div>
    }
}
