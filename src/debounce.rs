//! Debounced Writes
//!
//! Coalesces bursts of values into one delayed call. Each new value
//! cancels the pending timer; only the last value of a burst is delivered.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Generation-tagged pending value.
///
/// A timer carries the generation it was scheduled with; firing with an
/// older generation delivers nothing.
#[derive(Debug)]
pub struct DebounceSlot<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Default for DebounceSlot<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }
}

impl<T> DebounceSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending value and return the generation to fire with
    pub fn schedule(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.pending = Some(value);
        self.generation
    }

    /// Take the pending value if `generation` is still the latest
    pub fn fire(&mut self, generation: u64) -> Option<T> {
        if generation != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Take the pending value regardless of timers
    pub fn flush(&mut self) -> Option<T> {
        self.generation += 1;
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }
}

/// Timer-backed debouncer owned by the component that created it
pub struct Debouncer<T: 'static> {
    delay_ms: u32,
    slot: Rc<RefCell<DebounceSlot<T>>>,
    timer: RefCell<Option<Timeout>>,
    on_fire: Rc<dyn Fn(T)>,
}

impl<T: 'static> Debouncer<T> {
    pub fn new(delay_ms: u32, on_fire: impl Fn(T) + 'static) -> Self {
        Self {
            delay_ms,
            slot: Rc::new(RefCell::new(DebounceSlot::new())),
            timer: RefCell::new(None),
            on_fire: Rc::new(on_fire),
        }
    }

    pub fn push(&self, value: T) {
        let generation = self.slot.borrow_mut().schedule(value);
        let slot = Rc::clone(&self.slot);
        let on_fire = Rc::clone(&self.on_fire);
        let timeout = Timeout::new(self.delay_ms, move || {
            let ready = slot.borrow_mut().fire(generation);
            if let Some(value) = ready {
                on_fire(value);
            }
        });
        // Dropping the previous Timeout clears it
        self.timer.replace(Some(timeout));
    }

    /// Deliver the pending value now, if any
    pub fn flush(&self) {
        self.timer.replace(None);
        let ready = self.slot.borrow_mut().flush();
        if let Some(value) = ready {
            (self.on_fire)(value);
        }
    }

    pub fn cancel(&self) {
        self.timer.replace(None);
        self.slot.borrow_mut().cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_delivers_only_last_value() {
        let mut slot = DebounceSlot::new();
        let mut saved = Vec::new();

        // Three scale changes inside one window; each schedules a timer
        let timers: Vec<u64> = [0.40, 0.45, 0.50].iter().map(|s| slot.schedule(*s)).collect();

        // All three timers eventually fire, in order
        for generation in timers {
            if let Some(value) = slot.fire(generation) {
                saved.push(value);
            }
        }
        assert_eq!(saved, vec![0.50]);
        assert_eq!(slot.flush(), None);
    }

    #[test]
    fn test_separate_windows_deliver_each() {
        let mut slot = DebounceSlot::new();
        let first = slot.schedule("a");
        assert_eq!(slot.fire(first), Some("a"));
        let second = slot.schedule("b");
        assert_eq!(slot.fire(second), Some("b"));
        assert_eq!(slot.fire(second), None);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut slot = DebounceSlot::new();
        let generation = slot.schedule(1);
        slot.cancel();
        assert_eq!(slot.fire(generation), None);
    }

    #[test]
    fn test_flush_invalidates_timer() {
        let mut slot = DebounceSlot::new();
        let generation = slot.schedule("note");
        assert_eq!(slot.flush(), Some("note"));
        assert_eq!(slot.fire(generation), None);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;

    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn recorder() -> (Rc<RefCell<Vec<f64>>>, impl Fn(f64) + 'static) {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&fired);
        (fired, move |value| sink.borrow_mut().push(value))
    }

    #[wasm_bindgen_test]
    async fn rapid_pushes_fire_once_with_last_value() {
        let (fired, on_fire) = recorder();
        let debouncer = Debouncer::new(30, on_fire);

        debouncer.push(0.40);
        debouncer.push(0.45);
        debouncer.push(0.50);
        assert!(fired.borrow().is_empty());

        TimeoutFuture::new(90).await;
        assert_eq!(*fired.borrow(), vec![0.50]);
    }

    #[wasm_bindgen_test]
    async fn flush_fires_now_and_timer_stays_quiet() {
        let (fired, on_fire) = recorder();
        let debouncer = Debouncer::new(30, on_fire);

        debouncer.push(1.0);
        debouncer.flush();
        assert_eq!(*fired.borrow(), vec![1.0]);

        TimeoutFuture::new(90).await;
        assert_eq!(*fired.borrow(), vec![1.0]);
    }
}
