//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Every field is
//! a mirror of host state; the host push wins over local edits.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::bindings::ModelBindings;
use crate::commands::{ModelEntry, PresetMap};
use crate::models::{
    ChatMessage, ChatRole, ClipboardItem, Launcher, PetState, Plugin, PomodoroState, SystemInfo, TodoItem,
};
use crate::settings::{Settings, SettingsMap};

/// Chat log cap; older lines are dropped
pub const CHAT_HISTORY_LIMIT: usize = 200;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Host settings merged with local edits
    pub settings: Settings,
    pub pet: PetState,
    pub pomodoro: PomodoroState,
    pub todos: Vec<TodoItem>,
    pub clipboard: Vec<ClipboardItem>,
    pub note: String,
    pub system_info: Option<SystemInfo>,
    /// Last AI connection test outcome, shown in the AI and more-info panels
    pub ai_test_status: String,
    pub models: Vec<ModelEntry>,
    /// Binding table of the current model
    pub bindings: ModelBindings,
    pub presets: PresetMap,
    pub launchers: Vec<Launcher>,
    pub plugins: Vec<Plugin>,
    pub chat: Vec<ChatMessage>,
    /// Id source for chat lines
    pub chat_seq: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

// ========================
// Store Helper Functions
// ========================

/// Merge a settings delta; keys outside the delta are kept
pub fn store_merge_settings(store: &AppStore, delta: &SettingsMap) {
    store.settings().write().merge(delta);
}

pub fn store_set_favor(store: &AppStore, favor: i64) {
    let mut delta = SettingsMap::new();
    delta.insert("favor".to_string(), favor.into());
    store_merge_settings(store, &delta);
}

/// Append a chat line, trimming the oldest past the cap
pub fn store_push_chat(store: &AppStore, role: ChatRole, text: impl Into<String>) {
    let id = {
        let seq_field = store.chat_seq();
        let mut seq = seq_field.write();
        *seq = seq.wrapping_add(1);
        *seq
    };
    let chat_field = store.chat();
    let mut chat = chat_field.write();
    chat.push(ChatMessage { id, role, text: text.into() });
    if chat.len() > CHAT_HISTORY_LIMIT {
        let overflow = chat.len() - CHAT_HISTORY_LIMIT;
        chat.drain(..overflow);
    }
}

/// Optimistic local removal; the host push follows
pub fn store_remove_todo(store: &AppStore, todo_id: i64) {
    store.todos().write().retain(|todo| todo.id != todo_id);
}

pub fn store_remove_launcher(store: &AppStore, launcher_id: i64) {
    store.launchers().write().retain(|launcher| launcher.id != launcher_id);
}

pub fn store_set_plugin_enabled(store: &AppStore, plugin_id: &str, enabled: bool) {
    if let Some(plugin) = store.plugins().write().iter_mut().find(|p| p.id == plugin_id) {
        plugin.enabled = enabled;
    }
}

/// Filter clipboard history by a case-insensitive substring
pub fn filter_clipboard(items: &[ClipboardItem], query: &str) -> Vec<ClipboardItem> {
    let query = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| query.is_empty() || item.text.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str) -> ClipboardItem {
        ClipboardItem { text: text.to_string() }
    }

    #[test]
    fn test_filter_clipboard() {
        let items = vec![item("Hello World"), item("cargo build"), item("hello again")];
        let found = filter_clipboard(&items, " HELLO ");
        assert_eq!(found, vec![item("Hello World"), item("hello again")]);
        assert_eq!(filter_clipboard(&items, "").len(), 3);
        assert!(filter_clipboard(&items, "missing").is_empty());
    }

    #[test]
    fn test_chat_log_is_capped() {
        let owner = Owner::new();
        owner.with(|| {
            let store = Store::new(AppState::default());
            for i in 0..(CHAT_HISTORY_LIMIT + 5) {
                store_push_chat(&store, ChatRole::User, format!("line {}", i));
            }
            let chat = store.chat().get_untracked();
            assert_eq!(chat.len(), CHAT_HISTORY_LIMIT);
            assert_eq!(chat[0].text, "line 5");
            assert_eq!(chat.last().map(|m| m.id), Some((CHAT_HISTORY_LIMIT + 5) as u32));
        });
    }

    #[test]
    fn test_merge_settings_keeps_other_keys() {
        let owner = Owner::new();
        owner.with(|| {
            let store = Store::new(AppState::default());
            store_set_favor(&store, 88);
            let settings = store.settings().get_untracked();
            assert_eq!(settings.favor(), 88);
            assert_eq!(settings.f64("model_scale"), 0.35);
        });
    }
}
