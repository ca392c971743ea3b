//! Pet Companion Frontend App
//!
//! Root component: provides the store and context, connects to the host,
//! wires host push events and global keyboard/window-drag input, and lays
//! out the avatar, chat and panels.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use serde_json::Value;

use crate::avatar::motion_for_message;
use crate::bindings::{ModelBindings, MotionBinding};
use crate::commands::{self, Bridge};
use crate::components::{
    AiPanel, AvatarStage, BindingsPanel, ChatPanel, ClipboardPanel, ContextMenu, LauncherForm, LauncherPanel,
    MoreInfoPanel, NotePanel, PassivePanel, PluginPanel, PomodoroPanel, QuickToolbar, ReminderPanel, SettingsPanel,
    SpeechBubble, SysInfoPanel, TodoPanel, ToolsPanel,
};
use crate::context::AppContext;
use crate::dom::on_window;
use crate::hotkey::{Chord, KeyPress};
use crate::interaction::DragKind;
use crate::models::{
    AiTestResult, ChatRole, ClipboardItem, Launcher, PetState, Plugin, PomodoroState, SystemInfo, TodoItem,
};
use crate::panels::PanelId;
use crate::settings::SettingsMap;
use crate::store::{store_merge_settings, store_push_chat, store_set_favor, AppState, AppStateStoreFields};

/// Payloads that are either a bare value or an object wrapping it
fn unwrap_payload<'a>(value: &'a Value, keys: &[&str]) -> &'a Value {
    match value {
        Value::Object(map) => keys.iter().find_map(|k| map.get(*k)).unwrap_or(value),
        _ => value,
    }
}

fn payload_text(value: &Value, keys: &[&str]) -> Option<String> {
    unwrap_payload(value, keys)
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn payload_number(value: &Value, keys: &[&str]) -> Option<i64> {
    let inner = unwrap_payload(value, keys);
    inner
        .as_f64()
        .or_else(|| inner.as_str().and_then(|s| s.trim().parse().ok()))
        .map(|v| v as i64)
}

fn payload_bool(value: &Value, keys: &[&str]) -> Option<bool> {
    unwrap_payload(value, keys).as_bool()
}

/// Pull every host-owned mirror once the bridge is up
fn load_initial_state(ctx: AppContext) {
    let store = ctx.store;
    spawn_local(async move {
        match commands::get_initial_state().await {
            Ok(pet) => store.pet().set(pet),
            Err(err) => commands::report("get_initial_state", Err(err)),
        }
        match commands::get_settings().await {
            Ok(values) => store_merge_settings(&store, &values),
            Err(err) => commands::report("get_settings", Err(err)),
        }
        match commands::get_favor().await {
            Ok(favor) => store_set_favor(&store, favor),
            Err(err) => commands::report("get_favor", Err(err)),
        }
        match commands::get_note().await {
            Ok(note) => store.note().set(note),
            Err(err) => commands::report("get_note", Err(err)),
        }
        match commands::get_clipboard_history().await {
            Ok(items) => store.clipboard().set(items),
            Err(err) => commands::report("get_clipboard_history", Err(err)),
        }
        match commands::get_todos().await {
            Ok(items) => store.todos().set(items),
            Err(err) => commands::report("get_todos", Err(err)),
        }
        match commands::get_available_models().await {
            Ok(models) => store.models().set(models),
            Err(err) => commands::report("get_available_models", Err(err)),
        }
        match commands::get_available_presets().await {
            Ok(presets) => store.presets().set(presets),
            Err(err) => commands::report("get_available_presets", Err(err)),
        }
        match commands::get_launchers().await {
            Ok(launchers) => store.launchers().set(launchers),
            Err(err) => commands::report("get_launchers", Err(err)),
        }
        match commands::get_plugins().await {
            Ok(plugins) => store.plugins().set(plugins),
            Err(err) => commands::report("get_plugins", Err(err)),
        }
    });
}

/// Mirror host pushes into the store
fn subscribe_host_events(ctx: AppContext, bridge: Bridge) {
    let store = ctx.store;

    commands::subscribe(bridge, commands::STATE_UPDATED, move |pet: PetState| store.pet().set(pet));
    commands::subscribe(bridge, commands::SETTINGS_UPDATED, move |values: SettingsMap| {
        store_merge_settings(&store, &values)
    });
    commands::subscribe(bridge, commands::REMINDERS_UPDATED, move |values: SettingsMap| {
        store_merge_settings(&store, &values)
    });
    commands::subscribe(bridge, commands::TODOS_UPDATED, move |items: Option<Vec<TodoItem>>| {
        store.todos().set(items.unwrap_or_default())
    });
    commands::subscribe(bridge, commands::CLIPBOARD_UPDATED, move |items: Option<Vec<ClipboardItem>>| {
        store.clipboard().set(items.unwrap_or_default())
    });
    commands::subscribe(bridge, commands::SYSTEM_INFO_UPDATED, move |info: Option<SystemInfo>| {
        store.system_info().set(info)
    });
    commands::subscribe(bridge, commands::NOTE_UPDATED, move |value: Value| {
        let text = unwrap_payload(&value, &["text", "note"]).as_str().unwrap_or_default().to_string();
        if store.note().with_untracked(|note| *note != text) {
            store.note().set(text);
        }
    });
    commands::subscribe(bridge, commands::POMODORO_UPDATED, move |state: PomodoroState| {
        store.pomodoro().set(state)
    });
    commands::subscribe(bridge, commands::FAVOR_UPDATED, move |value: Value| {
        if let Some(favor) = payload_number(&value, &["favor", "value"]) {
            store_set_favor(&store, favor);
        }
    });
    commands::subscribe(bridge, commands::AI_TEST_RESULT, move |result: AiTestResult| {
        store.ai_test_status().set(result.status_text())
    });
    commands::subscribe(bridge, commands::AI_REPLY, move |value: Value| {
        if let Some(text) = payload_text(&value, &["text", "message"]) {
            store_push_chat(&store, ChatRole::Pet, text);
            ctx.play_binding("ai", "reply");
        }
    });
    commands::subscribe(bridge, commands::PASSIVE_MESSAGE, move |value: Value| {
        let Some(text) = payload_text(&value, &["text", "message"]) else { return };
        if let Some(group) = motion_for_message(&text) {
            ctx.avatar.with_value(|a| a.trigger_motion(group));
        }
        ctx.show_bubble(text);
    });
    commands::subscribe(bridge, commands::BINDING_PREVIEW, move |binding: MotionBinding| {
        ctx.avatar.with_value(|a| a.play(&binding));
    });
    commands::subscribe(bridge, commands::BINDINGS_UPDATED, move |bindings: ModelBindings| {
        let current = store.settings().with_untracked(|s| s.string("model_path"));
        if bindings.model_path.is_empty() || bindings.model_path == current {
            store.bindings().set(bindings);
        }
    });
    commands::subscribe(bridge, commands::LAUNCHERS_UPDATED, move |items: Option<Vec<Launcher>>| {
        store.launchers().set(items.unwrap_or_default())
    });
    commands::subscribe(bridge, commands::PLUGINS_UPDATED, move |items: Option<Vec<Plugin>>| {
        store.plugins().set(items.unwrap_or_default())
    });
    commands::subscribe(bridge, commands::OPEN_PANEL, move |value: Value| {
        let Some(name) = payload_text(&value, &["panel", "name"]) else { return };
        match PanelId::from_name(&name) {
            Some(id) => ctx.toggle_panel(id),
            None => log::debug!("open-panel: unknown panel `{}`", name),
        }
    });
    commands::subscribe(bridge, commands::MODEL_EDIT_MODE_CHANGED, move |value: Value| {
        if let Some(enabled) = payload_bool(&value, &["enabled", "value"]) {
            ctx.model_edit_mode.set(enabled);
        }
    });
}

/// Chat hotkey and Escape
fn bind_keyboard(ctx: AppContext) {
    on_window("keydown", move |ev: web_sys::KeyboardEvent| {
        let press = KeyPress::from_event(&ev);
        if press.is_escape() {
            ctx.close_all();
            return;
        }
        let hotkey = ctx.store.settings().with_untracked(|s| s.string("chat_hotkey"));
        match hotkey.parse::<Chord>() {
            Ok(chord) if chord.matches(&press) => {
                ev.prevent_default();
                ctx.chat_hidden.update(|hidden| *hidden = !*hidden);
            }
            Ok(_) => {}
            Err(err) => log::trace!("chat hotkey `{}`: {}", hotkey, err),
        }
    });
}

/// Host window moves are in screen coordinates
fn screen_point(ev: &web_sys::MouseEvent) -> (f64, f64) {
    (ev.screen_x() as f64, ev.screen_y() as f64)
}

/// Move mode: any press on the page drags the host window
fn bind_window_drag(ctx: AppContext) {
    on_window("mousedown", move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || !ctx.gate.get_untracked().move_mode() || !ctx.bridge_ready() {
            return;
        }
        if ev.target().is_some_and(|t| leptos_floating::is_form_control(&t)) {
            return;
        }
        if !ctx.arbiter.try_update_value(|a| a.try_begin(DragKind::Window)).unwrap_or(false) {
            return;
        }
        let (x, y) = screen_point(&ev);
        spawn_local(async move {
            commands::report("start window drag", commands::start_window_drag(x, y).await);
        });
    });
    on_window("mousemove", move |ev: web_sys::MouseEvent| {
        if !ctx.arbiter.with_value(|a| a.is_active(DragKind::Window)) {
            return;
        }
        let (x, y) = screen_point(&ev);
        spawn_local(async move {
            commands::report("move window drag", commands::move_window_drag(x, y).await);
        });
    });
    on_window("mouseup", move |_: web_sys::MouseEvent| {
        if !ctx.arbiter.try_update_value(|a| a.end(DragKind::Window)).unwrap_or(false) {
            return;
        }
        spawn_local(async {
            commands::report("end window drag", commands::end_window_drag().await);
        });
    });
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    let ctx = AppContext::new(store);
    provide_context(ctx);

    bind_keyboard(ctx);
    bind_window_drag(ctx);

    // Connect once; everything host-backed starts from here
    spawn_local(async move {
        let Some(bridge) = Bridge::connect().await else {
            ctx.log_status("未连接到宿主，部分功能不可用");
            return;
        };
        ctx.bridge.set(Some(bridge));
        ctx.sync_window_drag();
        subscribe_host_events(ctx, bridge);
        load_initial_state(ctx);
    });

    view! {
        <div class="app-root" class:move-mode=move || ctx.gate.with(|g| g.move_mode())>
            <AvatarStage />
            <SpeechBubble />
            <ChatPanel />
            <QuickToolbar />
            <ContextMenu />

            // Tool panels; at most one is visible
            <ToolsPanel />
            <NotePanel />
            <ClipboardPanel />
            <SysInfoPanel />
            <SettingsPanel />
            <PomodoroPanel />
            <ReminderPanel />
            <TodoPanel />
            <AiPanel />
            <PassivePanel />
            <MoreInfoPanel />
            <BindingsPanel />
            <LauncherPanel />
            <PluginPanel />

            <LauncherForm />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_text_accepts_bare_and_wrapped() {
        assert_eq!(payload_text(&json!(" 加油哦 "), &["text"]), Some("加油哦".to_string()));
        assert_eq!(payload_text(&json!({ "text": "困了" }), &["text"]), Some("困了".to_string()));
        assert_eq!(payload_text(&json!(""), &["text"]), None);
        assert_eq!(payload_text(&json!({ "other": 1 }), &["text"]), None);
    }

    #[test]
    fn test_payload_number_and_bool() {
        assert_eq!(payload_number(&json!(72), &["favor"]), Some(72));
        assert_eq!(payload_number(&json!("64"), &["favor"]), Some(64));
        assert_eq!(payload_number(&json!({ "favor": 10.0 }), &["favor"]), Some(10));
        assert_eq!(payload_bool(&json!({ "enabled": true }), &["enabled"]), Some(true));
        assert_eq!(payload_bool(&json!(false), &["enabled"]), Some(false));
    }
}
