//! Test fixtures and helpers.
//!
//! Common setup code for driving estates without a real stack or clock.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use stead_core::EstateId;
use stead_estate::{Stack, TimeSource};

/// Manually advanced time source for deterministic timer tests.
#[derive(Default)]
pub struct ManualTimeSource {
    now: Mutex<Duration>,
}

impl ManualTimeSource {
    /// Create a source pinned at zero, ready to be advanced.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Move time forward by `by`.
    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }

    /// Jump time to an absolute point.
    pub fn set(&self, to: Duration) {
        *self.now.lock().unwrap() = to;
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Duration {
        *self.now.lock().unwrap()
    }
}

/// A stand-in stack: allocates ids, records keep-alive probes, and owns a
/// manual clock shared by every estate built against it.
pub struct TestStack {
    name: String,
    clock: Arc<ManualTimeSource>,
    next_id: Cell<u32>,
    remotes: RefCell<BTreeSet<EstateId>>,
    probes: RefCell<Vec<EstateId>>,
}

impl TestStack {
    /// Create a stack with the given name; id allocation starts at 1.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            clock: ManualTimeSource::new(),
            next_id: Cell::new(1),
            remotes: RefCell::new(BTreeSet::new()),
            probes: RefCell::new(Vec::new()),
        }
    }

    /// The manual clock estates of this stack run on.
    pub fn clock(&self) -> Arc<ManualTimeSource> {
        self.clock.clone()
    }

    /// Move the stack's clock forward.
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Mark an id as occupied in the remote table, so allocation skips it
    /// and explicit use collides.
    pub fn occupy(&self, id: EstateId) {
        self.remotes.borrow_mut().insert(id);
    }

    /// Keep-alive probes dispatched so far, in order.
    pub fn probes(&self) -> Vec<EstateId> {
        self.probes.borrow().clone()
    }
}

impl Stack for TestStack {
    fn next_estate_id(&self) -> EstateId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        EstateId::new(id)
    }

    fn has_remote(&self, id: EstateId) -> bool {
        self.remotes.borrow().contains(&id)
    }

    fn send_keep_alive(&self, target: EstateId) {
        self.probes.borrow_mut().push(target);
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn time_source(&self) -> Arc<dyn TimeSource> {
        self.clock.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_time_advances() {
        let clock = ManualTimeSource::new();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.advance(Duration::from_secs(3));
        assert_eq!(clock.now(), Duration::from_secs(3));
        clock.set(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(1));
    }

    #[test]
    fn test_stack_allocates_sequential_ids() {
        let stack = TestStack::new("alpha");
        assert_eq!(stack.next_estate_id(), EstateId::new(1));
        assert_eq!(stack.next_estate_id(), EstateId::new(2));
    }

    #[test]
    fn test_stack_records_probes() {
        let stack = TestStack::new("alpha");
        stack.send_keep_alive(EstateId::new(4));
        stack.send_keep_alive(EstateId::new(2));
        assert_eq!(stack.probes(), vec![EstateId::new(4), EstateId::new(2)]);
    }
}
