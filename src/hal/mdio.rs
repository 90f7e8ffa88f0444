//! MDIO (Management Data Input/Output) HAL
//!
//! This module drives the AR71xx MII management block used to talk to
//! Ethernet PHYs. A transaction is started by writing the command/control
//! registers and completed by polling the indicator register; there is no
//! completion interrupt.
//!
//! # Transaction sequences
//!
//! Read:
//! 1. wait until idle
//! 2. MII_CMD = write-mode, MII_ADDR = (device, register)
//! 3. MII_CMD = read-mode (starts the transaction)
//! 4. wait until idle, take MII_STATUS\[15:0\]
//! 5. MII_CMD = write-mode, leaving the bus idle
//!
//! Write:
//! 1. MII_ADDR = (device, register)
//! 2. MII_CTRL = value (starts the transaction)
//! 3. wait until idle
//!
//! Waiting polls MII_IND at most `retries` times with `poll_delay_us`
//! between polls, i.e. about 5 ms with the defaults. Do not call into the
//! bus from a context that cannot block that long.

use embedded_hal::delay::DelayNs;

use crate::constants::MDIO_RESET_HOLD_US;
use crate::driver::config::{MdioConfig, MdioDivider, MdioVariant};
use crate::driver::error::{ConfigError, ConfigResult, IoError, Result};
use crate::register::RegisterAccess;
use crate::register::mdio::{
    MII_ADDR_OFFSET, MII_CFG_DIV_MASK, MII_CFG_OFFSET, MII_CFG_RESET, MII_CMD_OFFSET,
    MII_CMD_READ, MII_CMD_WRITE, MII_CTRL_OFFSET, MII_DATA_MASK, MII_IND_BUSY, MII_IND_INVALID,
    MII_IND_OFFSET, MII_STATUS_OFFSET, mii_addr,
};

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for MDIO bus operations
///
/// This is the surface a PHY management layer sees. It can be implemented
/// by different backends, allowing PHY code to run against mocks.
pub trait MdioBus {
    /// Reset the bus controller and program its clock divider
    fn reset(&mut self) -> Result<()>;

    /// Read a PHY register
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()>;

    /// Check if the MDIO bus is busy
    fn is_busy(&self) -> bool;
}

// =============================================================================
// Divider Selection
// =============================================================================

/// Pick the fastest divider that keeps MDC at or below `mdio_rate_hz`
///
/// `table` must be ordered by ascending divisor. When no entry is slow
/// enough the last (slowest) entry is used. Entries with a zero divisor
/// are never selected by the rate check.
///
/// # Errors
///
/// - [`ConfigError::InvalidClock`] if `ref_clock_hz` is zero
/// - [`ConfigError::InvalidConfig`] if `table` is empty
pub fn select_divider(
    ref_clock_hz: u32,
    mdio_rate_hz: u32,
    table: &[MdioDivider],
) -> ConfigResult<MdioDivider> {
    if ref_clock_hz == 0 {
        return Err(ConfigError::InvalidClock);
    }
    let Some(slowest) = table.last() else {
        return Err(ConfigError::InvalidConfig);
    };

    let chosen = table
        .iter()
        .find(|d| {
            ref_clock_hz
                .checked_div(d.divisor)
                .is_some_and(|rate| rate <= mdio_rate_hz)
        })
        .unwrap_or(slowest);

    Ok(*chosen)
}

// =============================================================================
// Register Snapshot
// =============================================================================

/// Values of all MDIO registers at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterSnapshot {
    /// MII_CFG
    pub cfg: u32,
    /// MII_CMD
    pub cmd: u32,
    /// MII_ADDR
    pub addr: u32,
    /// MII_CTRL
    pub ctrl: u32,
    /// MII_STATUS
    pub status: u32,
    /// MII_IND
    pub ind: u32,
}

// =============================================================================
// MDIO Controller
// =============================================================================

/// MDIO controller for PHY register access
///
/// Owns its register window exclusively; every operation takes `&mut self`,
/// so two transactions on one controller can never overlap.
#[derive(Debug)]
pub struct MdioController<R: RegisterAccess, D: DelayNs> {
    /// MAC register window containing the MII management block
    regs: R,
    /// Delay provider for polling and reset hold times
    delay: D,
    /// Hardware divider table
    variant: MdioVariant,
    /// Clock and timeout settings
    config: MdioConfig,
}

impl<R: RegisterAccess, D: DelayNs> MdioController<R, D> {
    /// Create a new MDIO controller
    ///
    /// No register is touched until [`MdioBus::reset`] or a transaction.
    pub fn new(regs: R, delay: D, variant: MdioVariant, config: MdioConfig) -> Self {
        Self {
            regs,
            delay,
            variant,
            config,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &MdioConfig {
        &self.config
    }

    /// Hardware variant
    pub fn variant(&self) -> &MdioVariant {
        &self.variant
    }

    /// Update the reference clock; takes effect at the next reset
    pub fn set_ref_clock_hz(&mut self, hz: u32) {
        self.config.ref_clock_hz = hz;
    }

    /// Update the maximum MDC frequency; takes effect at the next reset
    pub fn set_mdio_rate_hz(&mut self, hz: u32) {
        self.config.mdio_rate_hz = hz;
    }

    /// Set the busy-poll bound and per-poll delay
    pub fn set_timeout(&mut self, retries: u32, poll_delay_us: u32) {
        self.config.retries = retries;
        self.config.poll_delay_us = poll_delay_us;
    }

    /// Divider the next reset will program
    pub fn divider(&self) -> ConfigResult<MdioDivider> {
        select_divider(
            self.config.ref_clock_hz,
            self.config.mdio_rate_hz,
            self.variant.div_table,
        )
    }

    /// Release the register window and delay provider
    pub fn free(self) -> (R, D) {
        (self.regs, self.delay)
    }

    #[inline]
    fn read_reg(&self, offset: usize) -> u32 {
        self.regs.read(offset)
    }

    /// Write a register and read it back to flush the posted write
    #[inline]
    fn write_reg(&self, offset: usize, value: u32) {
        self.regs.write(offset, value);
        let _ = self.regs.read(offset);
    }

    /// Check whether the last transaction was flagged invalid
    pub fn is_invalid(&self) -> bool {
        self.read_reg(MII_IND_OFFSET) & MII_IND_INVALID != 0
    }

    /// Read all MDIO registers
    pub fn snapshot(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            cfg: self.read_reg(MII_CFG_OFFSET),
            cmd: self.read_reg(MII_CMD_OFFSET),
            addr: self.read_reg(MII_ADDR_OFFSET),
            ctrl: self.read_reg(MII_CTRL_OFFSET),
            status: self.read_reg(MII_STATUS_OFFSET),
            ind: self.read_reg(MII_IND_OFFSET),
        }
    }

    /// Log all MDIO registers at debug level
    ///
    /// Registers are only read when logging is compiled in.
    pub fn dump_regs(&self) {
        #[cfg(feature = "defmt")]
        {
            let s = self.snapshot();
            defmt::debug!(
                "mii_cfg={:#010x}, mii_cmd={:#010x}, mii_addr={:#010x}",
                s.cfg,
                s.cmd,
                s.addr
            );
            defmt::debug!(
                "mii_ctrl={:#010x}, mii_status={:#010x}, mii_ind={:#010x}",
                s.ctrl,
                s.status,
                s.ind
            );
        }
    }

    /// Wait until the busy indicator clears
    ///
    /// Polls MII_IND up to `retries` times, delaying `poll_delay_us` after
    /// every busy poll.
    ///
    /// # Errors
    ///
    /// [`IoError::Timeout`] once every poll has seen the bus busy.
    pub fn wait_idle(&mut self) -> Result<()> {
        for _ in 0..self.config.retries {
            if self.read_reg(MII_IND_OFFSET) & MII_IND_BUSY == 0 {
                return Ok(());
            }
            self.delay.delay_us(self.config.poll_delay_us);
        }

        #[cfg(feature = "defmt")]
        defmt::error!("MDIO operation timed out");
        self.dump_regs();

        Err(IoError::Timeout.into())
    }
}

impl<R: RegisterAccess, D: DelayNs> MdioBus for MdioController<R, D> {
    fn reset(&mut self) -> Result<()> {
        let divider = self.divider()?;
        let code = divider.code & MII_CFG_DIV_MASK;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "mdio reset: ref_clock={} Hz, divisor={}, code={}",
            self.config.ref_clock_hz,
            divider.divisor,
            code
        );

        self.write_reg(MII_CFG_OFFSET, code | MII_CFG_RESET);
        self.delay.delay_us(MDIO_RESET_HOLD_US);

        self.write_reg(MII_CFG_OFFSET, code);
        self.delay.delay_us(MDIO_RESET_HOLD_US);

        Ok(())
    }

    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        self.wait_idle()?;

        self.write_reg(MII_CMD_OFFSET, MII_CMD_WRITE);
        self.write_reg(MII_ADDR_OFFSET, mii_addr(phy_addr, reg_addr));
        self.write_reg(MII_CMD_OFFSET, MII_CMD_READ);

        let value = self
            .wait_idle()
            .map(|()| (self.read_reg(MII_STATUS_OFFSET) & MII_DATA_MASK) as u16);

        // Leave the bus in write-mode even if the transaction timed out
        self.write_reg(MII_CMD_OFFSET, MII_CMD_WRITE);

        #[cfg(feature = "defmt")]
        if let Ok(v) = value {
            defmt::debug!(
                "mii_read: addr={:04x}, reg={:04x}, value={:04x}",
                phy_addr,
                reg_addr,
                v
            );
        }

        value
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "mii_write: addr={:04x}, reg={:04x}, value={:04x}",
            phy_addr,
            reg_addr,
            value
        );

        self.write_reg(MII_ADDR_OFFSET, mii_addr(phy_addr, reg_addr));
        self.write_reg(MII_CTRL_OFFSET, value as u32);

        self.wait_idle()
    }

    fn is_busy(&self) -> bool {
        self.read_reg(MII_IND_OFFSET) & MII_IND_BUSY != 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
