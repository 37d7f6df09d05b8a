//! Recording delay provider for integration tests.
//!
//! Keeps every millisecond wait so tests can assert reset hold times
//! without sleeping. Clones share one log, so a test can hand one clone to
//! `Periph` and inspect another.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;

#[derive(Debug, Default, Clone)]
pub struct MockDelay {
    waits_ms: Rc<RefCell<Vec<u32>>>,
}

#[allow(dead_code)]
impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits_ms(&self) -> Vec<u32> {
        self.waits_ms.borrow().clone()
    }

    pub fn total_ms(&self) -> u32 {
        self.waits_ms.borrow().iter().sum()
    }

    pub fn clear(&self) {
        self.waits_ms.borrow_mut().clear();
    }
}

impl DelayNs for MockDelay {
    // Sub-millisecond waits are not used by the bring-up path.
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.borrow_mut().push(ms);
    }
}
