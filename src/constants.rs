//! Centralized Constants
//!
//! This module provides a single source of truth for the timing values and
//! default rates used by the MDIO and MII control drivers.
//!
//! # Note
//!
//! Hardware register bit definitions remain in their respective modules
//! (`register/mdio.rs`, `register/mii_ctrl.rs`) as they are specific to
//! those hardware blocks.

// =============================================================================
// Clock Frequencies
// =============================================================================

/// Default maximum MDC clock frequency in Hz (IEEE 802.3 limit)
pub const DEFAULT_MDIO_RATE_HZ: u32 = 2_500_000;

// =============================================================================
// Timing Constants
// =============================================================================

/// Number of indicator polls before an MDIO transaction times out
pub const MDIO_RETRIES: u32 = 1000;

/// Delay between two indicator polls in microseconds
pub const MDIO_POLL_DELAY_US: u32 = 5;

/// Time the MDIO block is held in (and given after) soft reset, in microseconds
pub const MDIO_RESET_HOLD_US: u32 = 100;

// =============================================================================
// MII Control Block
// =============================================================================

/// Number of MAC ports served by one MII control block
pub const MII_CTRL_PORTS: usize = 2;

/// Default number of controller slots in a [`crate::MiiCtrlRegistry`]
pub const DEFAULT_REGISTRY_SLOTS: usize = 2;
