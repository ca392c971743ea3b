//! Tools Panel Component
//!
//! Launch pad for the smaller tool panels.

use leptos::prelude::*;

use super::ToolPanel;
use crate::context::use_app_context;
use crate::panels::PanelId;

const TOOLS: &[(PanelId, &str)] = &[
    (PanelId::Note, "📝 便签"),
    (PanelId::Clipboard, "📋 剪贴板"),
    (PanelId::SysInfo, "📊 系统信息"),
    (PanelId::Todo, "✅ 待办"),
    (PanelId::Launcher, "🚀 启动器"),
    (PanelId::Bindings, "🎭 动作绑定"),
    (PanelId::Plugins, "🧩 插件"),
];

#[component]
pub fn ToolsPanel() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <ToolPanel id=PanelId::Tools>
            <div class="tool-grid">
                {TOOLS
                    .iter()
                    .map(|&(id, label)| {
                        view! {
                            <button class="tool-button" on:click=move |_| ctx.open_panel(id)>
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </ToolPanel>
    }
}
