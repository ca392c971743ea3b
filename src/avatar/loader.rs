//! Model Load Sequencing
//!
//! Loads are async and may finish out of order. Each load takes a ticket;
//! only the newest ticket may attach its result, and attaching releases
//! whatever was attached before.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

/// Monotonic load counter shared by all in-flight loads
#[derive(Debug, Clone, Default)]
pub struct LoadSequence(Rc<Cell<u64>>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadSequence {
    /// Start a load; every older ticket becomes stale
    pub fn begin(&self) -> LoadTicket {
        let next = self.0.get() + 1;
        self.0.set(next);
        LoadTicket(next)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.0.get() == ticket.0
    }
}

/// Await one step of a load. The result is discarded when a newer load
/// began while the step was pending.
pub async fn settle<T, F>(sequence: &LoadSequence, ticket: LoadTicket, step: F) -> Option<T>
where
    F: Future<Output = T>,
{
    let value = step.await;
    sequence.is_current(ticket).then_some(value)
}

/// Holds the attached resource. Release happens through `Drop`.
#[derive(Debug)]
pub struct ModelSlot<R> {
    current: Option<R>,
}

impl<R> Default for ModelSlot<R> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<R> ModelSlot<R> {
    /// Attach a finished load. Stale results are dropped on the spot and
    /// `false` is returned; otherwise the previous resource is dropped
    /// before the new one takes its place.
    pub fn attach(&mut self, sequence: &LoadSequence, ticket: LoadTicket, resource: R) -> bool {
        if !sequence.is_current(ticket) {
            drop(resource);
            return false;
        }
        self.current.take();
        self.current = Some(resource);
        true
    }

    pub fn get(&self) -> Option<&R> {
        self.current.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.current.is_some()
    }

    /// Release the attached resource, if any
    pub fn clear(&mut self) {
        self.current.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records its own release
    struct FakeModel {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Drop for FakeModel {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("released {}", self.name));
        }
    }

    fn model(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> FakeModel {
        FakeModel { name, log: Rc::clone(log) }
    }

    #[test]
    fn test_late_first_load_never_overwrites_second() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sequence = LoadSequence::default();
        let mut slot = ModelSlot::default();

        let first = sequence.begin();
        let second = sequence.begin();

        // Second load finishes first
        assert!(slot.attach(&sequence, second, model("second", &log)));
        // First load arrives late and is discarded
        assert!(!slot.attach(&sequence, first, model("first", &log)));

        assert_eq!(slot.get().map(|m| m.name), Some("second"));
        assert_eq!(*log.borrow(), vec!["released first"]);
    }

    #[test]
    fn test_stale_load_in_order_is_released() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sequence = LoadSequence::default();
        let mut slot = ModelSlot::default();

        let first = sequence.begin();
        let second = sequence.begin();
        assert!(!slot.attach(&sequence, first, model("first", &log)));
        assert!(slot.attach(&sequence, second, model("second", &log)));

        assert_eq!(slot.get().map(|m| m.name), Some("second"));
        assert_eq!(*log.borrow(), vec!["released first"]);
    }

    #[test]
    fn test_switch_releases_previous_model() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sequence = LoadSequence::default();
        let mut slot = ModelSlot::default();

        let a = sequence.begin();
        assert!(slot.attach(&sequence, a, model("a", &log)));
        let b = sequence.begin();
        assert!(slot.attach(&sequence, b, model("b", &log)));

        assert_eq!(*log.borrow(), vec!["released a"]);
        slot.clear();
        assert_eq!(*log.borrow(), vec!["released a", "released b"]);
        assert!(!slot.is_attached());
    }

    #[test]
    fn test_ticket_goes_stale_on_new_begin() {
        let sequence = LoadSequence::default();
        let ticket = sequence.begin();
        assert!(sequence.is_current(ticket));
        sequence.begin();
        assert!(!sequence.is_current(ticket));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use std::cell::RefCell;

    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    async fn fetch_after(ms: u32, name: &'static str) -> &'static str {
        TimeoutFuture::new(ms).await;
        name
    }

    #[wasm_bindgen_test]
    async fn late_descriptor_after_newer_load_is_dropped() {
        let sequence = LoadSequence::default();
        let first_result = Rc::new(RefCell::new(None));

        let first = sequence.begin();
        {
            let sequence = sequence.clone();
            let first_result = Rc::clone(&first_result);
            wasm_bindgen_futures::spawn_local(async move {
                let settled = settle(&sequence, first, fetch_after(40, "first")).await;
                *first_result.borrow_mut() = Some(settled);
            });
        }

        let second = sequence.begin();
        assert_eq!(settle(&sequence, second, fetch_after(5, "second")).await, Some("second"));

        TimeoutFuture::new(80).await;
        assert_eq!(*first_result.borrow(), Some(None));
    }

    #[wasm_bindgen_test]
    async fn sole_load_keeps_its_descriptor() {
        let sequence = LoadSequence::default();
        let ticket = sequence.begin();
        assert_eq!(settle(&sequence, ticket, fetch_after(5, "only")).await, Some("only"));
    }
}
