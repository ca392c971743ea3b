//! UI Components
//!
//! Avatar stage, chat, overlays and the tool panels.

mod tool_panel;
mod delete_confirm_button;
mod avatar_stage;
mod chat_panel;
mod speech_bubble;
mod context_menu;
mod quick_toolbar;
mod settings_panel;
mod tools_panel;
mod note_panel;
mod clipboard_panel;
mod sysinfo_panel;
mod pomodoro_panel;
mod reminder_panel;
mod todo_panel;
mod ai_panel;
mod passive_panel;
mod more_info_panel;
mod bindings_panel;
mod launcher_panel;
mod launcher_form;
mod plugin_panel;

pub use tool_panel::ToolPanel;
pub use delete_confirm_button::DeleteConfirmButton;
pub use avatar_stage::AvatarStage;
pub use chat_panel::ChatPanel;
pub use speech_bubble::SpeechBubble;
pub use context_menu::ContextMenu;
pub use quick_toolbar::QuickToolbar;
pub use settings_panel::SettingsPanel;
pub use tools_panel::ToolsPanel;
pub use note_panel::NotePanel;
pub use clipboard_panel::ClipboardPanel;
pub use sysinfo_panel::SysInfoPanel;
pub use pomodoro_panel::PomodoroPanel;
pub use reminder_panel::ReminderPanel;
pub use todo_panel::TodoPanel;
pub use ai_panel::AiPanel;
pub use passive_panel::PassivePanel;
pub use more_info_panel::MoreInfoPanel;
pub use bindings_panel::BindingsPanel;
pub use launcher_panel::LauncherPanel;
pub use launcher_form::LauncherForm;
pub use plugin_panel::PluginPanel;
