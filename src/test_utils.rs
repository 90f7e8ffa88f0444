//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the MDIO and MII
//! control drivers on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::vec::Vec;

use crate::register::RegisterAccess;
use crate::register::mdio::{MII_IND_BUSY, MII_IND_OFFSET};

// =============================================================================
// Mock Register Window
// =============================================================================

/// Mock register window for testing drivers without hardware
///
/// Registers read back the last value written (0 if never written). The
/// MDIO indicator register can be scripted to report busy for a number of
/// polls, or to stay busy forever.
///
/// # Example
///
/// ```ignore
/// let regs = MockRegisters::new();
/// regs.set_register(MII_STATUS_OFFSET, 0x1234);
/// regs.set_busy_polls(3);
///
/// let mut mdio = MdioController::new(&regs, MockDelay::new(), variant, config);
/// assert_eq!(mdio.read(0, 1).unwrap(), 0x1234);
/// ```
#[derive(Debug, Default)]
pub struct MockRegisters {
    /// Register values: offset -> value
    registers: RefCell<HashMap<usize, u32>>,
    /// Record of writes: (offset, value)
    write_log: RefCell<Vec<(usize, u32)>>,
    /// Record of reads: offset
    read_log: RefCell<Vec<usize>>,
    /// Indicator polls left that report busy
    busy_polls: Cell<u32>,
    /// Indicator reports busy on every poll
    stuck_busy: Cell<bool>,
}

impl MockRegisters {
    /// Create a new mock register window
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register value without logging a write
    pub fn set_register(&self, offset: usize, value: u32) {
        self.registers.borrow_mut().insert(offset, value);
    }

    /// Get the stored value of a register (for test verification)
    pub fn get_register(&self, offset: usize) -> u32 {
        self.registers.borrow().get(&offset).copied().unwrap_or(0)
    }

    /// Get all writes that have been made
    pub fn get_writes(&self) -> Vec<(usize, u32)> {
        self.write_log.borrow().clone()
    }

    /// Get the values written to one register, in order
    pub fn writes_to(&self, offset: usize) -> Vec<u32> {
        self.write_log
            .borrow()
            .iter()
            .filter(|w| w.0 == offset)
            .map(|w| w.1)
            .collect()
    }

    /// Number of reads of one register
    pub fn read_count(&self, offset: usize) -> usize {
        self.read_log.borrow().iter().filter(|&&o| o == offset).count()
    }

    /// Clear the write and read logs
    pub fn clear_logs(&self) {
        self.write_log.borrow_mut().clear();
        self.read_log.borrow_mut().clear();
    }

    /// Report busy for the next `polls` indicator reads
    pub fn set_busy_polls(&self, polls: u32) {
        self.busy_polls.set(polls);
    }

    /// Report busy on every indicator read
    pub fn set_stuck_busy(&self, stuck: bool) {
        self.stuck_busy.set(stuck);
    }
}

impl RegisterAccess for MockRegisters {
    fn read(&self, offset: usize) -> u32 {
        self.read_log.borrow_mut().push(offset);

        let value = self.get_register(offset);
        if offset != MII_IND_OFFSET {
            return value;
        }

        if self.stuck_busy.get() {
            return value | MII_IND_BUSY;
        }

        let remaining = self.busy_polls.get();
        if remaining > 0 {
            self.busy_polls.set(remaining - 1);
            value | MII_IND_BUSY
        } else {
            value & !MII_IND_BUSY
        }
    }

    fn write(&self, offset: usize, value: u32) {
        self.write_log.borrow_mut().push((offset, value));
        self.registers.borrow_mut().insert(offset, value);
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
    /// Number of delay calls
    calls: Cell<u32>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total microseconds that were "delayed"
    pub fn total_us(&self) -> u64 {
        self.total_ns() / 1_000
    }

    /// Number of delay calls made
    pub fn calls(&self) -> u32 {
        self.calls.get()
    }

    /// Reset the delay counter
    pub fn reset(&self) {
        *self.total_ns.borrow_mut() = 0;
        self.calls.set(0);
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
        self.calls.set(self.calls.get() + 1);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_ns(us.saturating_mul(1_000));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::mdio::MII_STATUS_OFFSET;
    use std::vec;

    #[test]
    fn mock_registers_read_write() {
        let regs = MockRegisters::new();

        // Initially reads 0
        assert_eq!(regs.read(0x10), 0);

        regs.write(0x10, 0x1234);
        assert_eq!(regs.read(0x10), 0x1234);

        assert_eq!(regs.get_writes(), vec![(0x10, 0x1234)]);
        assert_eq!(regs.read_count(0x10), 2);
    }

    #[test]
    fn mock_registers_busy_script() {
        let regs = MockRegisters::new();
        regs.set_busy_polls(2);

        assert_ne!(regs.read(MII_IND_OFFSET) & MII_IND_BUSY, 0);
        assert_ne!(regs.read(MII_IND_OFFSET) & MII_IND_BUSY, 0);
        assert_eq!(regs.read(MII_IND_OFFSET) & MII_IND_BUSY, 0);
    }

    #[test]
    fn mock_registers_stuck_busy() {
        let regs = MockRegisters::new();
        regs.set_stuck_busy(true);

        for _ in 0..10 {
            assert_ne!(regs.read(MII_IND_OFFSET) & MII_IND_BUSY, 0);
        }

        // Other registers are unaffected
        regs.set_register(MII_STATUS_OFFSET, 5);
        assert_eq!(regs.read(MII_STATUS_OFFSET), 5);
    }

    #[test]
    fn mock_registers_writes_to_filters() {
        let regs = MockRegisters::new();
        regs.write(0x24, 0);
        regs.write(0x28, 7);
        regs.write(0x24, 1);

        assert_eq!(regs.writes_to(0x24), vec![0, 1]);
        regs.clear_logs();
        assert!(regs.get_writes().is_empty());
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 1000);
        embedded_hal::delay::DelayNs::delay_us(&mut delay, 5);

        assert_eq!(delay.total_ns(), 6000);
        assert_eq!(delay.total_us(), 6);
        assert_eq!(delay.calls(), 2);

        delay.reset();
        assert_eq!(delay.total_ns(), 0);
    }
}
