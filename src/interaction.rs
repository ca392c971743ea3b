//! Pointer Interaction State
//!
//! Window-drag permission, drag-mode arbitration and petting throttle.
//! All of it is plain state; components feed events in and forward the
//! resulting host calls.

/// Reasons the host should stop treating a press as a window drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    /// Pointer is over (or dragging) the avatar
    Model,
    /// Pointer is over an interactive panel or the chat input has focus
    Ui,
}

/// Decides whether the host may drag the window and remembers what was
/// last reported so the host only hears about changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragGate {
    move_mode: bool,
    model_blocked: bool,
    ui_blocked: bool,
    reported: Option<bool>,
}

impl DragGate {
    pub fn move_mode(&self) -> bool {
        self.move_mode
    }

    pub fn window_drag_allowed(&self) -> bool {
        self.move_mode || (!self.model_blocked && !self.ui_blocked)
    }

    /// Entering move mode clears both blockers
    pub fn set_move_mode(&mut self, enabled: bool) {
        self.move_mode = enabled;
        if enabled {
            self.model_blocked = false;
            self.ui_blocked = false;
        }
    }

    pub fn set_blocker(&mut self, blocker: Blocker, blocked: bool) {
        match blocker {
            Blocker::Model => self.model_blocked = blocked,
            Blocker::Ui => self.ui_blocked = blocked,
        }
    }

    /// Value to send to the host, if it differs from the last one sent.
    /// Without a bridge nothing is marked as sent, so the value stays
    /// pending until the next call with `bridge_ready`.
    pub fn take_update(&mut self, bridge_ready: bool) -> Option<bool> {
        if !bridge_ready {
            return None;
        }
        let allowed = self.window_drag_allowed();
        if self.reported == Some(allowed) {
            return None;
        }
        self.reported = Some(allowed);
        Some(allowed)
    }
}

/// Drag behaviours that compete for one pointer press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Host moves the whole window (move mode)
    Window,
    /// Avatar offset follows the pointer (model edit mode / over model)
    Avatar,
    /// A floating panel or the quick toolbar
    Floating,
}

/// At most one drag owns the pointer at a time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragArbiter {
    active: Option<DragKind>,
}

impl DragArbiter {
    pub fn is_active(&self, kind: DragKind) -> bool {
        self.active == Some(kind)
    }

    pub fn try_begin(&mut self, kind: DragKind) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(kind);
        true
    }

    /// Release `kind`; returns false if it did not own the pointer
    pub fn end(&mut self, kind: DragKind) -> bool {
        if self.active == Some(kind) {
            self.active = None;
            true
        } else {
            false
        }
    }
}

/// Minimum gap between petting reactions
pub const PETTING_INTERVAL_MS: f64 = 800.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PettingThrottle {
    last_ms: Option<f64>,
}

impl PettingThrottle {
    pub fn try_pet(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_ms {
            if now_ms - last < PETTING_INTERVAL_MS {
                return false;
            }
        }
        self.last_ms = Some(now_ms);
        true
    }
}

/// Tracks the avatar-reposition drag
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AvatarDrag {
    last: Option<(f64, f64)>,
}

impl AvatarDrag {
    pub fn begin(&mut self, pointer: (f64, f64)) {
        self.last = Some(pointer);
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    /// Pointer delta since the previous call
    pub fn step(&mut self, pointer: (f64, f64)) -> Option<(f64, f64)> {
        let last = self.last?;
        self.last = Some(pointer);
        Some((pointer.0 - last.0, pointer.1 - last.1))
    }

    pub fn end(&mut self) -> bool {
        self.last.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_mode_overrides_blockers() {
        let mut gate = DragGate::default();
        gate.set_blocker(Blocker::Model, true);
        gate.set_blocker(Blocker::Ui, true);
        assert!(!gate.window_drag_allowed());

        gate.set_move_mode(true);
        assert!(gate.window_drag_allowed());

        // Blockers raised during move mode do not matter
        gate.set_blocker(Blocker::Ui, true);
        assert!(gate.window_drag_allowed());
    }

    #[test]
    fn test_leaving_move_mode_restores_blockers() {
        let mut gate = DragGate::default();
        gate.set_move_mode(true);
        gate.set_blocker(Blocker::Model, true);
        gate.set_move_mode(false);
        assert!(!gate.window_drag_allowed());

        gate.set_blocker(Blocker::Model, false);
        assert!(gate.window_drag_allowed());

        gate.set_blocker(Blocker::Ui, true);
        assert!(!gate.window_drag_allowed());
    }

    #[test]
    fn test_updates_only_on_change() {
        let mut gate = DragGate::default();
        assert_eq!(gate.take_update(true), Some(true));
        assert_eq!(gate.take_update(true), None);
        gate.set_blocker(Blocker::Ui, true);
        assert_eq!(gate.take_update(true), Some(false));
    }

    #[test]
    fn test_pending_until_bridge_ready() {
        let mut gate = DragGate::default();
        gate.set_blocker(Blocker::Model, true);
        assert_eq!(gate.take_update(false), None);
        assert_eq!(gate.take_update(true), Some(false));
    }

    #[test]
    fn test_arbiter_allows_one_drag() {
        let mut arbiter = DragArbiter::default();
        assert!(arbiter.try_begin(DragKind::Floating));
        assert!(!arbiter.try_begin(DragKind::Window));
        assert!(!arbiter.end(DragKind::Window));
        assert!(arbiter.end(DragKind::Floating));
        assert!(arbiter.try_begin(DragKind::Avatar));
        assert!(arbiter.is_active(DragKind::Avatar));
    }

    #[test]
    fn test_petting_throttle() {
        let mut throttle = PettingThrottle::default();
        assert!(throttle.try_pet(1000.0));
        assert!(!throttle.try_pet(1500.0));
        assert!(throttle.try_pet(1800.0));
    }

    #[test]
    fn test_avatar_drag_deltas() {
        let mut drag = AvatarDrag::default();
        assert_eq!(drag.step((5.0, 5.0)), None);
        drag.begin((10.0, 10.0));
        assert_eq!(drag.step((14.0, 7.0)), Some((4.0, -3.0)));
        assert_eq!(drag.step((15.0, 7.0)), Some((1.0, 0.0)));
        assert!(drag.end());
        assert!(!drag.is_dragging());
    }
}
