//! Context Menu Component
//!
//! Right-click menu at the pointer. Any click elsewhere closes it.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::dom::on_window;
use crate::panels::PanelId;

/// Menu entries in display order
const ENTRIES: &[(PanelId, &str)] = &[
    (PanelId::Tools, "小工具"),
    (PanelId::Pomodoro, "番茄钟"),
    (PanelId::Reminder, "提醒"),
    (PanelId::Ai, "AI 设置"),
    (PanelId::Passive, "主动聊天"),
    (PanelId::Bindings, "动作绑定"),
    (PanelId::Launcher, "启动器"),
    (PanelId::Plugins, "插件"),
    (PanelId::MoreInfo, "更多信息"),
    (PanelId::Settings, "设置"),
];

#[component]
pub fn ContextMenu() -> impl IntoView {
    let ctx = use_app_context();

    on_window("contextmenu", move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        ctx.context_menu.set(Some((ev.client_x() as f64, ev.client_y() as f64)));
    });
    on_window("click", move |_: web_sys::MouseEvent| {
        if ctx.context_menu.get_untracked().is_some() {
            ctx.context_menu.set(None);
        }
    });

    let style = move || match ctx.context_menu.get() {
        Some((x, y)) => format!("left: {}px; top: {}px;", x, y),
        None => String::new(),
    };

    view! {
        <div
            class="context-menu"
            class:visible=move || ctx.context_menu.with(|m| m.is_some())
            style=style
        >
            {ENTRIES
                .iter()
                .map(|&(id, label)| {
                    view! {
                        <div
                            class="menu-item"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                ctx.context_menu.set(None);
                                if id == PanelId::Settings {
                                    ctx.open_panel(id);
                                } else {
                                    ctx.toggle_panel(id);
                                }
                            }
                        >
                            {label}
                        </div>
                    }
                })
                .collect_view()}
            <div
                class="menu-item"
                on:click=move |ev| {
                    ev.stop_propagation();
                    ctx.context_menu.set(None);
                    ctx.chat_hidden.update(|hidden| *hidden = !*hidden);
                }
            >
                {move || if ctx.chat_hidden.get() { "显示聊天框" } else { "隐藏聊天框" }}
            </div>
        </div>
    }
}
