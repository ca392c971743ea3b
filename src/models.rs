//! Frontend Models
//!
//! Mirrors of host-owned state. The host pushes these; the UI never owns them.

use serde::{Deserialize, Serialize};

/// Pet status pushed with `state-updated`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetState {
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub focus_seconds_today: u64,
    #[serde(default)]
    pub mood: Option<Mood>,
}

impl Default for PetState {
    fn default() -> Self {
        Self {
            status: default_status(),
            focus_seconds_today: 0,
            mood: None,
        }
    }
}

fn default_status() -> String {
    "idle".to_string()
}

/// Mood computed by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub emoji: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PomodoroMode {
    Focus,
    Break,
    #[default]
    #[serde(other)]
    Idle,
}

impl PomodoroMode {
    pub fn label(&self) -> &'static str {
        match self {
            PomodoroMode::Focus => "focus",
            PomodoroMode::Break => "break",
            PomodoroMode::Idle => "idle",
        }
    }
}

/// Pomodoro snapshot; replaced wholesale on every push
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PomodoroState {
    #[serde(default)]
    pub mode: PomodoroMode,
    #[serde(default)]
    pub remaining_sec: u32,
    #[serde(default)]
    pub focus_min: u32,
    #[serde(default)]
    pub break_min: u32,
    #[serde(default)]
    pub count_today: u32,
    #[serde(default)]
    pub running: bool,
}

impl PomodoroState {
    /// Fraction of the current phase already elapsed, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        let minutes = match self.mode {
            PomodoroMode::Break => self.break_min,
            _ => self.focus_min,
        };
        let total = f64::from(minutes) * 60.0;
        if total <= 0.0 {
            return 0.0;
        }
        (1.0 - f64::from(self.remaining_sec) / total).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    /// Unix seconds
    pub due_ts: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipboardItem {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(default)]
    pub cpu: Option<f64>,
    #[serde(default)]
    pub memory: Option<f64>,
    #[serde(default)]
    pub net_up: Option<f64>,
    #[serde(default)]
    pub net_down: Option<f64>,
    #[serde(default)]
    pub battery: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiTestResult {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl AiTestResult {
    pub fn status_text(&self) -> String {
        let message = self
            .message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("未返回结果");
        if self.ok {
            format!("成功：{}", message)
        } else {
            format!("失败：{}", message)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LauncherKind {
    #[default]
    Web,
    App,
    Group,
}

impl LauncherKind {
    pub const ALL: [LauncherKind; 3] = [LauncherKind::Web, LauncherKind::App, LauncherKind::Group];

    pub fn as_str(&self) -> &'static str {
        match self {
            LauncherKind::Web => "web",
            LauncherKind::App => "app",
            LauncherKind::Group => "group",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LauncherKind::Web => "网页",
            LauncherKind::App => "应用",
            LauncherKind::Group => "套件",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "app" => LauncherKind::App,
            "group" => LauncherKind::Group,
            _ => LauncherKind::Web,
        }
    }
}

/// Group member referencing another launcher
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LauncherRef {
    pub launcher_id: i64,
}

/// Launcher entry (matches host)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Launcher {
    /// 0 asks the host to assign an id
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: LauncherKind,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub hotkey: String,
    #[serde(default)]
    pub items: Vec<LauncherRef>,
    #[serde(default)]
    pub usage_count: u32,
}

impl Launcher {
    /// Case-insensitive match on name or any tag
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

/// Plugin descriptor (matches host)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub loaded: bool,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Pet,
}

impl ChatRole {
    pub fn class(&self) -> &'static str {
        match self {
            ChatRole::User => "msg user",
            ChatRole::Pet => "msg pet",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u32,
    pub role: ChatRole,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pomodoro_progress_uses_current_phase() {
        let state = PomodoroState {
            mode: PomodoroMode::Break,
            remaining_sec: 150,
            focus_min: 25,
            break_min: 5,
            ..Default::default()
        };
        assert!((state.progress() - 0.5).abs() < 1e-9);

        let idle = PomodoroState::default();
        assert_eq!(idle.progress(), 0.0);
    }

    #[test]
    fn test_pomodoro_progress_is_clamped() {
        let state = PomodoroState {
            mode: PomodoroMode::Focus,
            remaining_sec: 5000,
            focus_min: 25,
            ..Default::default()
        };
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_unknown_pomodoro_mode_is_idle() {
        let state: PomodoroState = serde_json::from_str(r#"{"mode":"paused","remaining_sec":3}"#).unwrap();
        assert_eq!(state.mode, PomodoroMode::Idle);
        assert_eq!(state.remaining_sec, 3);
    }

    #[test]
    fn test_launcher_deserializes_host_shape() {
        let launcher: Launcher = serde_json::from_str(
            r#"{"id":3,"name":"Docs","type":"group","items":[{"launcher_id":1}],"tags":["work"]}"#,
        )
        .unwrap();
        assert_eq!(launcher.kind, LauncherKind::Group);
        assert_eq!(launcher.items, vec![LauncherRef { launcher_id: 1 }]);
        assert!(launcher.matches("WOR"));
        assert!(!launcher.matches("music"));
    }

    #[test]
    fn test_ai_status_text() {
        let ok = AiTestResult { ok: true, message: Some("pong".into()) };
        assert_eq!(ok.status_text(), "成功：pong");
        let empty = AiTestResult { ok: false, message: None };
        assert_eq!(empty.status_text(), "失败：未返回结果");
    }
}
