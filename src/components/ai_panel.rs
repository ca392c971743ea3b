//! AI Settings Panel Component
//!
//! Provider credentials, local context and a connection test.

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;

use super::settings_panel::{push_settings, seed_on_open, SettingsTarget};
use super::ToolPanel;
use crate::commands;
use crate::context::use_app_context;
use crate::panels::PanelId;
use crate::settings::{delta, DEFAULT_AI_BASE_URL, DEFAULT_AI_MODEL, DEFAULT_AI_PROVIDER};
use crate::store::AppStateStoreFields;

/// Status text while a connection test runs
pub const AI_TEST_PENDING: &str = "测试中...";

fn or_default(value: String, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

#[component]
fn TextField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional)] secret: bool,
) -> impl IntoView {
    view! {
        <label class="field">
            <span>{label}</span>
            <input
                type=if secret { "password" } else { "text" }
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn AiPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let provider = RwSignal::new(String::new());
    let base_url = RwSignal::new(String::new());
    let model = RwSignal::new(String::new());
    let api_key = RwSignal::new(String::new());
    let city = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());

    seed_on_open(ctx, PanelId::Ai, move |s| {
        provider.set(s.string("ai_provider"));
        base_url.set(s.string("ai_base_url"));
        model.set(s.string("ai_model"));
        api_key.set(s.string("ai_api_key"));
        city.set(s.string("local_city"));
        location.set(s.string("local_location"));
    });

    let save = move |_| {
        let values = delta(json!({
            "ai_provider": or_default(provider.get_untracked(), DEFAULT_AI_PROVIDER),
            "ai_base_url": or_default(base_url.get_untracked(), DEFAULT_AI_BASE_URL),
            "ai_model": or_default(model.get_untracked(), DEFAULT_AI_MODEL),
            "ai_api_key": api_key.get_untracked().trim(),
            "local_city": city.get_untracked().trim(),
            "local_location": location.get_untracked().trim(),
        }));
        push_settings(ctx, values, SettingsTarget::Ai);
        ctx.log_status("AI 设置已保存");
    };

    let test = move |_| {
        store.ai_test_status().set(AI_TEST_PENDING.to_string());
        spawn_local(async move {
            if let Err(err) = commands::test_ai_connection().await {
                if err.is_soft() {
                    log::debug!("test_ai_connection: {}", err);
                } else {
                    store.ai_test_status().set(format!("失败：{}", err));
                }
            }
        });
    };

    let detail = move |_| {
        spawn_local(async {
            commands::report("open ai detail", commands::open_ai_detail_dialog().await);
        });
    };

    view! {
        <ToolPanel id=PanelId::Ai>
            <TextField label="服务商" value=provider />
            <TextField label="接口地址" value=base_url />
            <TextField label="模型" value=model />
            <TextField label="API Key" value=api_key secret=true />
            <TextField label="所在城市" value=city />
            <TextField label="位置（经纬度）" value=location />
            <div class="panel-actions">
                <button class="primary" on:click=save>"保存"</button>
                <button on:click=test>"测试连接"</button>
                <button disabled=move || ctx.bridge.get().is_none() on:click=detail>
                    "详细设置"
                </button>
            </div>
            <div class="ai-test-result">{move || store.ai_test_status().get()}</div>
        </ToolPanel>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_use_defaults() {
        assert_eq!(or_default("  ".to_string(), DEFAULT_AI_MODEL), "gpt-4o-mini");
        assert_eq!(or_default(" deepseek-chat ".to_string(), DEFAULT_AI_MODEL), "deepseek-chat");
    }
}
