//! In-memory register file standing in for the FPGA address map.
//!
//! Reads return the last value written (zero if never written) and every
//! write through [`RegisterIo`] is appended to a bounded journal so tests
//! and the simulator can inspect the exact programming sequence. Handles
//! are cheap clones of one shared register file, mirroring how every driver
//! on the target shares the same physical bus.

use std::cell::RefCell;
use std::rc::Rc;

use heapless::{Deque, FnvIndexMap};
use log::warn;

use crate::drivers::io::RegisterIo;

/// Distinct register addresses the simulator can hold.
const SIM_REG_CAP: usize = 128;
/// Most recent writes kept in the journal; older entries are discarded.
const SIM_JOURNAL_CAP: usize = 256;

/// One journaled bus write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegWrite {
    pub addr: u32,
    pub value: u32,
}

#[derive(Default)]
struct SimState {
    regs: FnvIndexMap<u32, u32, SIM_REG_CAP>,
    journal: Deque<RegWrite, SIM_JOURNAL_CAP>,
    dropped: usize,
}

impl SimState {
    fn store(&mut self, addr: u32, value: u32) {
        if self.regs.insert(addr, value).is_err() {
            warn!("sim bus: register file full, dropping write to {:#010x}", addr);
        }
    }
}

#[derive(Clone, Default)]
pub struct SimBus {
    state: Rc<RefCell<SimState>>,
}

impl SimBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current register value without journaling.
    pub fn peek(&self, addr: u32) -> u32 {
        self.state.borrow().regs.get(&addr).copied().unwrap_or(0)
    }

    /// Set a register as the hardware would (status bits, inputs) without
    /// journaling.
    pub fn poke(&self, addr: u32, value: u32) {
        self.state.borrow_mut().store(addr, value);
    }

    /// Journaled writes, oldest first.
    pub fn writes(&self) -> Vec<RegWrite> {
        self.state.borrow().journal.iter().copied().collect()
    }

    /// Values written to `addr`, oldest first.
    pub fn writes_to(&self, addr: u32) -> Vec<u32> {
        self.state
            .borrow()
            .journal
            .iter()
            .filter(|w| w.addr == addr)
            .map(|w| w.value)
            .collect()
    }

    /// Writes that fell off the front of the journal.
    pub fn dropped_writes(&self) -> usize {
        self.state.borrow().dropped
    }

    pub fn clear_journal(&self) {
        let mut state = self.state.borrow_mut();
        state.journal.clear();
        state.dropped = 0;
    }

    /// Every register currently held, sorted by address.
    pub fn snapshot(&self) -> Vec<RegWrite> {
        let mut regs: Vec<RegWrite> = self
            .state
            .borrow()
            .regs
            .iter()
            .map(|(&addr, &value)| RegWrite { addr, value })
            .collect();
        regs.sort_by_key(|r| r.addr);
        regs
    }
}

impl RegisterIo for SimBus {
    fn read32(&self, addr: u32) -> u32 {
        self.peek(addr)
    }

    fn write32(&self, addr: u32, value: u32) {
        let mut state = self.state.borrow_mut();
        state.store(addr, value);
        let entry = RegWrite { addr, value };
        if state.journal.is_full() {
            let _ = state.journal.pop_front();
            state.dropped += 1;
        }
        // Cannot fail: a slot was freed above when full.
        let _ = state.journal.push_back(entry);
    }
}
