//! Reminder Panel Component
//!
//! Rest / water / eye reminders. Every edit is pushed immediately.

use leptos::prelude::*;
use serde_json::json;

use super::settings_panel::{push_settings, seed_on_open, NumberField, SettingsTarget, ToggleField};
use super::ToolPanel;
use crate::context::use_app_context;
use crate::panels::PanelId;
use crate::settings::{delta, parse_number};

#[component]
pub fn ReminderPanel() -> impl IntoView {
    let ctx = use_app_context();

    let rest_enabled = RwSignal::new(true);
    let rest_interval = RwSignal::new(String::new());
    let water_enabled = RwSignal::new(true);
    let water_interval = RwSignal::new(String::new());
    let eye_enabled = RwSignal::new(true);
    let eye_interval = RwSignal::new(String::new());

    seed_on_open(ctx, PanelId::Reminder, move |s| {
        rest_enabled.set(s.bool("rest_enabled"));
        rest_interval.set(s.f64("rest_interval_min").to_string());
        water_enabled.set(s.bool("water_enabled"));
        water_interval.set(s.f64("water_interval_min").to_string());
        eye_enabled.set(s.bool("eye_enabled"));
        eye_interval.set(s.f64("eye_interval_min").to_string());
    });

    let push = move || {
        let values = delta(json!({
            "rest_enabled": rest_enabled.get_untracked(),
            "rest_interval_min": parse_number(&rest_interval.get_untracked(), 90.0),
            "water_enabled": water_enabled.get_untracked(),
            "water_interval_min": parse_number(&water_interval.get_untracked(), 60.0),
            "eye_enabled": eye_enabled.get_untracked(),
            "eye_interval_min": parse_number(&eye_interval.get_untracked(), 45.0),
        }));
        push_settings(ctx, values, SettingsTarget::Reminders);
    };

    view! {
        <ToolPanel id=PanelId::Reminder>
            // Checkbox and number edits both bubble a `change` here
            <div on:change=move |_| push()>
                <ToggleField label="休息提醒" checked=rest_enabled />
                <NumberField label="间隔（分钟）" value=rest_interval />
                <ToggleField label="喝水提醒" checked=water_enabled />
                <NumberField label="间隔（分钟）" value=water_interval />
                <ToggleField label="护眼提醒" checked=eye_enabled />
                <NumberField label="间隔（分钟）" value=eye_interval />
            </div>
            <div class="panel-actions">
                <button on:click=move |_| ctx.open_panel(PanelId::Todo)>"待办事项"</button>
            </div>
        </ToolPanel>
    }
}
