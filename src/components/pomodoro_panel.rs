//! Pomodoro Panel Component
//!
//! Durations and transport controls; the timer itself runs in the host.

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;

use super::settings_panel::{seed_on_open, NumberField};
use super::ToolPanel;
use crate::commands;
use crate::context::use_app_context;
use crate::format::format_time;
use crate::panels::PanelId;
use crate::settings::{delta, parse_number};
use crate::store::{store_merge_settings, AppStateStoreFields};

#[component]
pub fn PomodoroPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let focus_min = RwSignal::new(String::new());
    let break_min = RwSignal::new(String::new());

    seed_on_open(ctx, PanelId::Pomodoro, move |s| {
        focus_min.set(s.f64("pomodoro_focus_min").to_string());
        break_min.set(s.f64("pomodoro_break_min").to_string());
    });

    let durations = move || {
        let focus = parse_number(&focus_min.get_untracked(), 25.0).max(1.0) as u32;
        let rest = parse_number(&break_min.get_untracked(), 5.0).max(1.0) as u32;
        (focus, rest)
    };

    let push_durations = move || {
        let (focus, rest) = durations();
        store_merge_settings(
            &store,
            &delta(json!({ "pomodoro_focus_min": focus, "pomodoro_break_min": rest })),
        );
        spawn_local(async move {
            commands::report("set durations", commands::set_pomodoro_durations(focus, rest).await);
        });
    };

    let start = move |_| {
        push_durations();
        spawn_local(async {
            commands::report("start pomodoro", commands::start_pomodoro().await);
        });
    };
    let pause = move |_| {
        spawn_local(async {
            commands::report("pause pomodoro", commands::pause_pomodoro().await);
        });
    };
    let stop = move |_| {
        spawn_local(async {
            commands::report("stop pomodoro", commands::stop_pomodoro().await);
        });
    };

    let progress_style = move || {
        let progress = store.pomodoro().with(|p| p.progress());
        format!("width: {}%;", (progress * 100.0).round())
    };

    view! {
        <ToolPanel id=PanelId::Pomodoro>
            <div on:change=move |_| push_durations()>
                <NumberField label="专注（分钟）" value=focus_min />
                <NumberField label="休息（分钟）" value=break_min />
            </div>
            <div class="pomodoro-status">
                <span class="pomodoro-mode">{move || store.pomodoro().with(|p| p.mode.label())}</span>
                <span class="pomodoro-remaining">
                    {move || format_time(store.pomodoro().with(|p| p.remaining_sec))}
                </span>
                <span class="pomodoro-count">
                    {move || format!("今日 {} 个", store.pomodoro().with(|p| p.count_today))}
                </span>
            </div>
            <div class="progress">
                <div class="progress-bar" style=progress_style></div>
            </div>
            <div class="panel-actions">
                <button class="primary" on:click=start>"开始"</button>
                <button on:click=pause>"暂停"</button>
                <button on:click=stop>"停止"</button>
            </div>
        </ToolPanel>
    }
}
