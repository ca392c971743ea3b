//! Settings Panel Component
//!
//! Focus thresholds, window opacity, model/UI scale and animation speed.
//! Also home of the shared "merge locally, then tell the host" helper the
//! other settings-style panels use.

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;

use super::ToolPanel;
use crate::commands;
use crate::context::{use_app_context, AppContext};
use crate::panels::PanelId;
use crate::settings::{delta, parse_number, Settings, SettingsMap};
use crate::store::{store_merge_settings, AppStateStoreFields};

/// Host command that persists a settings delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTarget {
    General,
    Reminders,
    Ai,
}

/// Apply-then-confirm: merge into the cache now, send to the host after
pub fn push_settings(ctx: AppContext, values: SettingsMap, target: SettingsTarget) {
    store_merge_settings(&ctx.store, &values);
    spawn_local(async move {
        let result = match target {
            SettingsTarget::General => commands::set_settings(&values).await,
            SettingsTarget::Reminders => commands::set_reminder_settings(&values).await,
            SettingsTarget::Ai => commands::set_ai_settings(&values).await,
        };
        commands::report("save settings", result);
    });
}

/// Rising edge of a panel's visibility
fn panel_opened(was: Option<bool>, now: bool) -> bool {
    now && was != Some(true)
}

/// Seed a form's drafts from the cache each time `panel` opens.
/// Settings merged while the panel is open leave the drafts alone.
pub fn seed_on_open(ctx: AppContext, panel: PanelId, seed: impl Fn(&Settings) + 'static) {
    let store = ctx.store;
    let panels = ctx.panels;
    let visible = Memo::new(move |_| panels.with(|p| p.is_visible(panel)));
    Effect::new(move |was: Option<bool>| {
        let now = visible.get();
        if panel_opened(was, now) {
            store.settings().with_untracked(|s| seed(s));
        }
        now
    });
}

/// Numeric form field bound to a draft signal
#[component]
pub fn NumberField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional, into)] step: Option<String>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span>{label}</span>
            <input
                type="number"
                step=step.unwrap_or_else(|| "1".to_string())
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

/// Checkbox bound to a signal
#[component]
pub fn ToggleField(#[prop(into)] label: String, checked: RwSignal<bool>) -> impl IntoView {
    view! {
        <label class="field toggle">
            <input
                type="checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| checked.set(event_target_checked(&ev))
            />
            <span>{label}</span>
        </label>
    }
}

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let ctx = use_app_context();

    let active_sec = RwSignal::new(String::new());
    let sleep_sec = RwSignal::new(String::new());
    let opacity = RwSignal::new(String::new());
    let model_scale = RwSignal::new(String::new());
    let ui_scale = RwSignal::new(String::new());
    let anim_speed = RwSignal::new(String::new());

    seed_on_open(ctx, PanelId::Settings, move |s| {
        active_sec.set(format!("{}", (s.f64("focus_active_ms") / 1000.0).round()));
        sleep_sec.set(format!("{}", (s.f64("focus_sleep_ms") / 1000.0).round()));
        opacity.set(format!("{}", s.f64("window_opacity")));
        model_scale.set(format!("{:.2}", s.f64("model_scale")));
        ui_scale.set(format!("{:.2}", s.f64("ui_scale")));
        anim_speed.set(format!("{:.1}", s.f64("animation_speed")));
    });

    let save = move |_| {
        let values = delta(json!({
            "focus_active_ms": parse_number(&active_sec.get_untracked(), 60.0) * 1000.0,
            "focus_sleep_ms": parse_number(&sleep_sec.get_untracked(), 120.0) * 1000.0,
            "window_opacity": parse_number(&opacity.get_untracked(), 100.0),
            "model_scale": parse_number(&model_scale.get_untracked(), 0.35),
            "ui_scale": parse_number(&ui_scale.get_untracked(), 1.0),
            "animation_speed": parse_number(&anim_speed.get_untracked(), 1.0),
        }));
        push_settings(ctx, values, SettingsTarget::General);
        ctx.close_panel(PanelId::Settings);
    };

    view! {
        <ToolPanel id=PanelId::Settings>
            <NumberField label="活跃阈值（秒）" value=active_sec />
            <NumberField label="休眠阈值（秒）" value=sleep_sec />
            <label class="field">
                <span>"窗口不透明度"</span>
                <input
                    type="range"
                    min="20"
                    max="100"
                    prop:value=move || opacity.get()
                    on:input=move |ev| opacity.set(event_target_value(&ev))
                />
                <input
                    type="number"
                    min="20"
                    max="100"
                    class="short"
                    prop:value=move || opacity.get()
                    on:input=move |ev| opacity.set(event_target_value(&ev))
                />
            </label>
            <NumberField label="模型缩放" value=model_scale step="0.05" />
            <NumberField label="界面缩放" value=ui_scale step="0.05" />
            <NumberField label="动画速度" value=anim_speed step="0.1" />
            <div class="panel-actions">
                <button class="primary" on:click=save>"保存"</button>
            </div>
        </ToolPanel>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drafts_seed_only_when_panel_opens() {
        let mut settings = Settings::default();
        let mut draft = String::new();
        let mut was = None;
        let mut step = |settings: &Settings, draft: &mut String, visible: bool| {
            if panel_opened(was, visible) {
                *draft = settings.string("ai_api_key");
            }
            was = Some(visible);
        };

        // Closed at startup
        step(&settings, &mut draft, false);
        assert_eq!(draft, "");

        settings.merge(&delta(json!({ "ai_api_key": "sk-old" })));
        step(&settings, &mut draft, true);
        assert_eq!(draft, "sk-old");

        // Typing, then a wheel zoom merges an unrelated key
        draft = "sk-typed".to_string();
        settings.merge(&delta(json!({ "model_scale": 0.5 })));
        step(&settings, &mut draft, true);
        assert_eq!(draft, "sk-typed");

        step(&settings, &mut draft, false);
        step(&settings, &mut draft, true);
        assert_eq!(draft, "sk-old");
    }
}
