//! More Info Panel Component
//!
//! Read-only overview of pet, pomodoro, settings and system state, plus
//! the recent log lines kept by the rolling logger.

use leptos::prelude::*;

use super::ToolPanel;
use crate::context::use_app_context;
use crate::format::{format_duration, format_percent, format_speed, format_time};
use crate::panels::PanelId;
use crate::store::AppStateStoreFields;

#[component]
pub fn MoreInfoPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let log_lines = RwSignal::new(Vec::<String>::new());

    // Snapshot the log whenever the panel opens
    Effect::new(move |_| {
        if ctx.panels.with(|p| p.is_visible(PanelId::MoreInfo)) {
            log_lines.set(rolling_logger::recent_lines());
        }
    });

    let rows = move || {
        let pet = store.pet().get();
        let pomodoro = store.pomodoro().get();
        let info = store.system_info().get().unwrap_or_default();
        let ai_status = store.ai_test_status().get();
        store.settings().with(|s| {
            vec![
                ("状态", pet.status.clone()),
                ("今日专注", format_duration(pet.focus_seconds_today)),
                (
                    "心情",
                    pet.mood
                        .as_ref()
                        .map(|m| format!("{} {}", m.emoji, m.label).trim().to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                ("好感度", s.favor().to_string()),
                ("AI 状态", if ai_status.is_empty() { "-".to_string() } else { ai_status }),
                ("AI 模型", s.string("ai_model")),
                (
                    "番茄钟",
                    format!("{} / {}", pomodoro.mode.label(), format_time(pomodoro.remaining_sec)),
                ),
                (
                    "阈值（秒）",
                    format!(
                        "{} / {}",
                        (s.f64("focus_active_ms") / 1000.0).round(),
                        (s.f64("focus_sleep_ms") / 1000.0).round()
                    ),
                ),
                ("不透明度", format!("{}%", s.f64("window_opacity"))),
                ("模型缩放", format!("{:.2}", s.f64("model_scale"))),
                ("CPU", format_percent(info.cpu)),
                ("内存", format_percent(info.memory)),
                ("网络", format!("{} / {}", format_speed(info.net_down), format_speed(info.net_up))),
                ("电量", format_percent(info.battery)),
            ]
        })
    };

    view! {
        <ToolPanel id=PanelId::MoreInfo class="wide">
            <div class="info-grid">
                {move || {
                    rows()
                        .into_iter()
                        .map(|(label, value)| {
                            view! {
                                <div class="info-row">
                                    <span class="info-label">{label}</span>
                                    <span class="info-value">{value}</span>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <details class="log-view">
                <summary>"最近日志"</summary>
                <pre>{move || log_lines.get().join("\n")}</pre>
            </details>
        </ToolPanel>
    }
}
