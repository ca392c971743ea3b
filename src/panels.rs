//! Panel Visibility
//!
//! Tool panels are mutually exclusive: at most one is visible.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Tools,
    Note,
    Clipboard,
    SysInfo,
    Settings,
    Pomodoro,
    Reminder,
    Todo,
    Ai,
    Passive,
    MoreInfo,
    Bindings,
    Launcher,
    Plugins,
}

impl PanelId {
    pub const ALL: [PanelId; 14] = [
        PanelId::Tools,
        PanelId::Note,
        PanelId::Clipboard,
        PanelId::SysInfo,
        PanelId::Settings,
        PanelId::Pomodoro,
        PanelId::Reminder,
        PanelId::Todo,
        PanelId::Ai,
        PanelId::Passive,
        PanelId::MoreInfo,
        PanelId::Bindings,
        PanelId::Launcher,
        PanelId::Plugins,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PanelId::Tools => "tools",
            PanelId::Note => "note",
            PanelId::Clipboard => "clipboard",
            PanelId::SysInfo => "sysinfo",
            PanelId::Settings => "settings",
            PanelId::Pomodoro => "pomodoro",
            PanelId::Reminder => "reminder",
            PanelId::Todo => "todo",
            PanelId::Ai => "ai",
            PanelId::Passive => "passive",
            PanelId::MoreInfo => "more-info",
            PanelId::Bindings => "bindings",
            PanelId::Launcher => "launcher",
            PanelId::Plugins => "plugins",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PanelId::Tools => "工具",
            PanelId::Note => "便签",
            PanelId::Clipboard => "剪贴板",
            PanelId::SysInfo => "系统信息",
            PanelId::Settings => "设置",
            PanelId::Pomodoro => "番茄钟",
            PanelId::Reminder => "提醒",
            PanelId::Todo => "待办",
            PanelId::Ai => "AI 设置",
            PanelId::Passive => "主动聊天",
            PanelId::MoreInfo => "更多信息",
            PanelId::Bindings => "动作绑定",
            PanelId::Launcher => "启动器",
            PanelId::Plugins => "插件",
        }
    }

    /// Accepts host names with or without the `-panel` suffix
    pub fn from_name(name: &str) -> Option<PanelId> {
        let name = name.trim();
        let name = name.strip_suffix("-panel").unwrap_or(name);
        PanelId::ALL.into_iter().find(|p| p.name() == name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelSet {
    visible: Option<PanelId>,
}

impl PanelSet {
    pub fn is_visible(&self, id: PanelId) -> bool {
        self.visible == Some(id)
    }

    /// Show `id` and hide the rest; toggles off if it was already showing.
    /// Returns true when `id` ends up visible.
    pub fn toggle(&mut self, id: PanelId) -> bool {
        if self.visible == Some(id) {
            self.visible = None;
            false
        } else {
            self.visible = Some(id);
            true
        }
    }

    pub fn open(&mut self, id: PanelId) {
        self.visible = Some(id);
    }

    pub fn close(&mut self, id: PanelId) {
        if self.visible == Some(id) {
            self.visible = None;
        }
    }

    pub fn close_all(&mut self) {
        self.visible = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_hides_others() {
        let mut panels = PanelSet::default();
        assert!(panels.toggle(PanelId::Note));
        assert!(panels.toggle(PanelId::Pomodoro));
        assert!(panels.is_visible(PanelId::Pomodoro));
        assert!(!panels.is_visible(PanelId::Note));
        let count = PanelId::ALL.iter().filter(|p| panels.is_visible(**p)).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_toggle_same_panel_closes() {
        let mut panels = PanelSet::default();
        panels.toggle(PanelId::Todo);
        assert!(!panels.toggle(PanelId::Todo));
        assert_eq!(panels.visible, None);
    }

    #[test]
    fn test_close_other_panel_is_noop() {
        let mut panels = PanelSet::default();
        panels.open(PanelId::Ai);
        panels.close(PanelId::Note);
        assert!(panels.is_visible(PanelId::Ai));
        panels.close_all();
        assert_eq!(panels.visible, None);
    }

    #[test]
    fn test_from_host_name() {
        assert_eq!(PanelId::from_name("note-panel"), Some(PanelId::Note));
        assert_eq!(PanelId::from_name("more-info"), Some(PanelId::MoreInfo));
        assert_eq!(PanelId::from_name("nope"), None);
    }
}
