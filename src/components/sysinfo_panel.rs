//! System Info Panel Component

use leptos::prelude::*;

use super::ToolPanel;
use crate::context::use_app_context;
use crate::format::{format_percent, format_speed};
use crate::models::SystemInfo;
use crate::panels::PanelId;
use crate::store::AppStateStoreFields;

#[component]
fn InfoRow(#[prop(into)] label: String, value: Signal<String>) -> impl IntoView {
    view! {
        <div class="info-row">
            <span class="info-label">{label}</span>
            <span class="info-value">{move || value.get()}</span>
        </div>
    }
}

#[component]
pub fn SysInfoPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let read = move |f: fn(&SystemInfo) -> String| {
        Signal::derive(move || {
            store
                .system_info()
                .with(|info| info.as_ref().map(f).unwrap_or_else(|| "-".to_string()))
        })
    };

    view! {
        <ToolPanel id=PanelId::SysInfo>
            <InfoRow label="CPU" value=read(|i| format_percent(i.cpu)) />
            <InfoRow label="内存" value=read(|i| format_percent(i.memory)) />
            <InfoRow label="下载" value=read(|i| format_speed(i.net_down)) />
            <InfoRow label="上传" value=read(|i| format_speed(i.net_up)) />
            <InfoRow label="电量" value=read(|i| format_percent(i.battery)) />
        </ToolPanel>
    }
}
