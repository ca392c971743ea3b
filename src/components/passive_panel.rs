//! Passive Chat Panel Component
//!
//! When and how the pet starts conversations on its own.

use leptos::prelude::*;
use serde_json::json;

use super::settings_panel::{push_settings, seed_on_open, NumberField, SettingsTarget, ToggleField};
use super::ToolPanel;
use crate::context::use_app_context;
use crate::panels::PanelId;
use crate::settings::{delta, parse_number};

#[component]
pub fn PassivePanel() -> impl IntoView {
    let ctx = use_app_context();

    let enabled = RwSignal::new(true);
    let random_enabled = RwSignal::new(true);
    let blessing_enabled = RwSignal::new(true);
    let focus_enabled = RwSignal::new(true);
    let interval = RwSignal::new(String::new());
    let focus_interval = RwSignal::new(String::new());

    seed_on_open(ctx, PanelId::Passive, move |s| {
        enabled.set(s.bool("passive_enabled"));
        random_enabled.set(s.bool("passive_random_enabled"));
        blessing_enabled.set(s.bool("passive_blessing_enabled"));
        focus_enabled.set(s.bool("passive_focus_enabled"));
        interval.set(s.f64("passive_interval_min").to_string());
        focus_interval.set(s.f64("passive_focus_interval_min").to_string());
    });

    let push = move |_| {
        let values = delta(json!({
            "passive_enabled": enabled.get_untracked(),
            "passive_random_enabled": random_enabled.get_untracked(),
            "passive_blessing_enabled": blessing_enabled.get_untracked(),
            "passive_focus_enabled": focus_enabled.get_untracked(),
            "passive_interval_min": parse_number(&interval.get_untracked(), 30.0),
            "passive_focus_interval_min": parse_number(&focus_interval.get_untracked(), 60.0),
        }));
        push_settings(ctx, values, SettingsTarget::General);
    };

    view! {
        <ToolPanel id=PanelId::Passive>
            <div on:change=push>
                <ToggleField label="启用主动聊天" checked=enabled />
                <ToggleField label="随机闲聊" checked=random_enabled />
                <ToggleField label="节日祝福" checked=blessing_enabled />
                <ToggleField label="专注陪伴" checked=focus_enabled />
                <NumberField label="闲聊间隔（分钟）" value=interval />
                <NumberField label="专注提醒间隔（分钟）" value=focus_interval />
            </div>
        </ToolPanel>
    }
}
