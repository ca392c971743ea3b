//! Leptos Floating Utilities
//!
//! Mouse-driven repositioning for floating panels and toolbars.
//! The element keeps its grab offset while the pointer moves, and a
//! small movement threshold separates clicks from drags.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels before a press becomes a drag
pub const DRAG_THRESHOLD_PX: f64 = 4.0;

/// Pure drag bookkeeping, independent of the DOM
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragTrack {
    /// Pointer position at press time
    pub start: (f64, f64),
    /// Pointer position relative to the element's top-left corner
    pub offset: (f64, f64),
    /// True once the pointer moved past the threshold
    pub moved: bool,
}

impl DragTrack {
    /// Start tracking from a press at `pointer` on an element whose
    /// top-left corner is at `origin`
    pub fn begin(pointer: (f64, f64), origin: (f64, f64)) -> Self {
        Self {
            start: pointer,
            offset: (pointer.0 - origin.0, pointer.1 - origin.1),
            moved: false,
        }
    }

    /// Feed a pointer position; returns the new top-left corner once the
    /// drag has started
    pub fn update(&mut self, pointer: (f64, f64)) -> Option<(f64, f64)> {
        if !self.moved {
            let dx = (pointer.0 - self.start.0).abs();
            let dy = (pointer.1 - self.start.1).abs();
            if dx <= DRAG_THRESHOLD_PX && dy <= DRAG_THRESHOLD_PX {
                return None;
            }
            self.moved = true;
        }
        Some((pointer.0 - self.offset.0, pointer.1 - self.offset.1))
    }
}

/// Floating element state signals
#[derive(Clone, Copy)]
pub struct FloatingSignals {
    /// Active drag, if any
    pub track: RwSignal<Option<DragTrack>>,
    /// Explicit position; `None` keeps the stylesheet placement
    pub position: RwSignal<Option<(f64, f64)>>,
}

impl FloatingSignals {
    pub fn is_dragging(&self) -> bool {
        self.track.get().map(|t| t.moved).unwrap_or(false)
    }

    /// Inline style pinning the element once it has been moved
    pub fn style(&self) -> String {
        match self.position.get() {
            Some((x, y)) => format!("left: {}px; top: {}px; right: auto; bottom: auto;", x, y),
            None => String::new(),
        }
    }
}

pub fn create_floating_signals() -> FloatingSignals {
    FloatingSignals {
        track: RwSignal::new(None),
        position: RwSignal::new(None),
    }
}

/// Presses on form controls never start a drag
pub fn is_form_control(target: &web_sys::EventTarget) -> bool {
    target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
}

/// Create mousedown handler for a drag handle.
///
/// `element` resolves the element that moves (usually the handle's
/// panel). `can_start` lets the caller veto the drag, e.g. when another
/// drag already owns the pointer.
pub fn make_on_mousedown<E, G>(
    signals: FloatingSignals,
    element: E,
    can_start: G,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    E: Fn() -> Option<web_sys::Element> + Clone + 'static,
    G: Fn() -> bool + Clone + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target() {
            if is_form_control(&target) {
                return;
            }
        }
        let Some(el) = element() else { return };
        if !can_start() {
            return;
        }
        let rect = el.get_bounding_client_rect();
        let pointer = (ev.client_x() as f64, ev.client_y() as f64);
        signals.track.set(Some(DragTrack::begin(pointer, (rect.left(), rect.top()))));
        ev.prevent_default();
    }
}

/// Bind document-level mousemove/mouseup for one floating element.
/// `on_end` runs after every release that ends a tracked press.
pub fn bind_global_listeners<F>(signals: FloatingSignals, on_end: F)
where
    F: Fn() + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(mut track) = signals.track.get_untracked() else { return };
        if let Some(pos) = track.update((ev.client_x() as f64, ev.client_y() as f64)) {
            signals.position.set(Some(pos));
        }
        signals.track.set(Some(track));
    });

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        if signals.track.get_untracked().is_none() {
            return;
        }
        signals.track.set(None);
        on_end();
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
    on_mouseup.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_moves_stay_clicks() {
        let mut track = DragTrack::begin((100.0, 100.0), (80.0, 90.0));
        assert_eq!(track.update((102.0, 101.0)), None);
        assert!(!track.moved);
    }

    #[test]
    fn test_drag_keeps_grab_offset() {
        let mut track = DragTrack::begin((100.0, 100.0), (80.0, 90.0));
        assert_eq!(track.offset, (20.0, 10.0));
        assert_eq!(track.update((150.0, 130.0)), Some((130.0, 120.0)));
        // Once moving, small steps still follow the pointer
        assert_eq!(track.update((151.0, 130.0)), Some((131.0, 120.0)));
    }
}
