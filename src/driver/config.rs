//! Configuration types for the MDIO bus and the MII control block
//!
//! Hardware variants are `const` descriptors; runtime settings use the
//! builder pattern (`with_*` methods).

use crate::constants::{DEFAULT_MDIO_RATE_HZ, MDIO_POLL_DELAY_US, MDIO_RETRIES, MII_CTRL_PORTS};
use crate::register::mii_ctrl::{
    MII_CTRL_SELECT_GMII, MII_CTRL_SELECT_MASK, MII_CTRL_SELECT_MII, MII_CTRL_SELECT_PORT1_MASK,
    MII_CTRL_SELECT_RGMII, MII_CTRL_SELECT_RMII, MII_CTRL_SPEED_10, MII_CTRL_SPEED_100,
    MII_CTRL_SPEED_1000,
};

// =============================================================================
// Interface Mode
// =============================================================================

/// MAC/PHY electrical interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceMode {
    /// Gigabit Media Independent Interface
    Gmii,
    /// Media Independent Interface
    Mii,
    /// Reduced Gigabit Media Independent Interface
    Rgmii,
    /// Reduced Media Independent Interface
    Rmii,
}

impl InterfaceMode {
    /// Whether the interface can carry 1000 Mbps
    pub const fn supports_gigabit(self) -> bool {
        matches!(self, InterfaceMode::Gmii | InterfaceMode::Rgmii)
    }

    /// Whether the hardware only routes this interface to port 0
    pub const fn port0_only(self) -> bool {
        matches!(self, InterfaceMode::Gmii | InterfaceMode::Mii)
    }

    /// Full-width select code
    pub const fn select_code(self) -> u32 {
        match self {
            InterfaceMode::Gmii => MII_CTRL_SELECT_GMII,
            InterfaceMode::Mii => MII_CTRL_SELECT_MII,
            InterfaceMode::Rgmii => MII_CTRL_SELECT_RGMII,
            InterfaceMode::Rmii => MII_CTRL_SELECT_RMII,
        }
    }

    /// Decode a select field as read from `port`'s control word
    ///
    /// Port 1 only implements bit 0: 0 is RGMII, 1 is RMII.
    pub const fn from_select(port: usize, select: u32) -> Self {
        if port == 1 {
            return if select & MII_CTRL_SELECT_PORT1_MASK == 0 {
                InterfaceMode::Rgmii
            } else {
                InterfaceMode::Rmii
            };
        }

        match select & MII_CTRL_SELECT_MASK {
            MII_CTRL_SELECT_GMII => InterfaceMode::Gmii,
            MII_CTRL_SELECT_MII => InterfaceMode::Mii,
            MII_CTRL_SELECT_RGMII => InterfaceMode::Rgmii,
            _ => InterfaceMode::Rmii,
        }
    }
}

// =============================================================================
// Link Speed
// =============================================================================

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkSpeed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    Mbps100,
    /// 1000 Mbps
    Mbps1000,
}

impl LinkSpeed {
    /// Map a speed in Mbps; anything other than 10, 100 or 1000 is `None`
    pub const fn from_mbps(mbps: u32) -> Option<Self> {
        match mbps {
            10 => Some(LinkSpeed::Mbps10),
            100 => Some(LinkSpeed::Mbps100),
            1000 => Some(LinkSpeed::Mbps1000),
            _ => None,
        }
    }

    /// Speed in Mbps
    pub const fn mbps(self) -> u32 {
        match self {
            LinkSpeed::Mbps10 => 10,
            LinkSpeed::Mbps100 => 100,
            LinkSpeed::Mbps1000 => 1000,
        }
    }

    /// Speed field code
    pub const fn speed_code(self) -> u32 {
        match self {
            LinkSpeed::Mbps10 => MII_CTRL_SPEED_10,
            LinkSpeed::Mbps100 => MII_CTRL_SPEED_100,
            LinkSpeed::Mbps1000 => MII_CTRL_SPEED_1000,
        }
    }

    /// Decode a speed field; the reserved code 3 is `None`
    pub const fn from_speed_code(code: u32) -> Option<Self> {
        match code {
            MII_CTRL_SPEED_10 => Some(LinkSpeed::Mbps10),
            MII_CTRL_SPEED_100 => Some(LinkSpeed::Mbps100),
            MII_CTRL_SPEED_1000 => Some(LinkSpeed::Mbps1000),
            _ => None,
        }
    }
}

// =============================================================================
// MDIO Hardware Variants
// =============================================================================

/// One MDC clock divider: the divisor and the MII_CFG code selecting it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MdioDivider {
    /// Reference clock divisor
    pub divisor: u32,
    /// Value programmed into the MII_CFG divider field
    pub code: u32,
}

impl MdioDivider {
    /// Create a divider entry
    pub const fn new(divisor: u32, code: u32) -> Self {
        Self { divisor, code }
    }
}

const fn div(divisor: u32, code: u32) -> MdioDivider {
    MdioDivider::new(divisor, code)
}

// Codes 0 and 1 select the same divisor on every variant; only code 0 is listed.
const AR7100_DIV_TABLE: [MdioDivider; 7] = [
    div(4, 0),
    div(6, 2),
    div(8, 3),
    div(10, 4),
    div(14, 5),
    div(20, 6),
    div(28, 7),
];

const AR7240_DIV_TABLE: [MdioDivider; 15] = [
    div(2, 0),
    div(4, 2),
    div(6, 3),
    div(8, 4),
    div(12, 5),
    div(18, 6),
    div(26, 7),
    div(32, 8),
    div(40, 9),
    div(48, 10),
    div(56, 11),
    div(62, 12),
    div(70, 13),
    div(78, 14),
    div(96, 15),
];

const AR9330_DIV_TABLE: [MdioDivider; 15] = [
    div(4, 0),
    div(6, 2),
    div(8, 3),
    div(10, 4),
    div(14, 5),
    div(20, 6),
    div(28, 7),
    div(34, 8),
    div(42, 9),
    div(50, 10),
    div(58, 11),
    div(66, 12),
    div(74, 13),
    div(82, 14),
    div(98, 15),
];

/// MDIO block hardware variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MdioVariant {
    /// Available dividers, ordered by ascending divisor (fastest first)
    pub div_table: &'static [MdioDivider],
}

impl MdioVariant {
    /// AR7100/AR7130/AR9130 family
    pub const AR7100: Self = Self::new(&AR7100_DIV_TABLE);
    /// AR7240/AR7241/AR7242 family
    pub const AR7240: Self = Self::new(&AR7240_DIV_TABLE);
    /// AR9330/AR9340 family
    pub const AR9330: Self = Self::new(&AR9330_DIV_TABLE);

    /// Describe a variant by its divider table
    pub const fn new(div_table: &'static [MdioDivider]) -> Self {
        Self { div_table }
    }
}

// =============================================================================
// MDIO Runtime Configuration
// =============================================================================

/// MDIO bus configuration
///
/// # Example
///
/// ```ignore
/// let config = MdioConfig::new()
///     .with_ref_clock_hz(200_000_000)
///     .with_mdio_rate_hz(2_500_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MdioConfig {
    /// Reference clock feeding the MDIO block, in Hz
    pub ref_clock_hz: u32,
    /// Maximum MDC frequency, in Hz
    pub mdio_rate_hz: u32,
    /// Indicator polls before a transaction times out
    pub retries: u32,
    /// Delay between indicator polls, in microseconds
    pub poll_delay_us: u32,
}

impl MdioConfig {
    /// Default configuration; the reference clock must still be set
    pub const fn new() -> Self {
        Self {
            ref_clock_hz: 0,
            mdio_rate_hz: DEFAULT_MDIO_RATE_HZ,
            retries: MDIO_RETRIES,
            poll_delay_us: MDIO_POLL_DELAY_US,
        }
    }

    /// Set the reference clock frequency
    #[must_use]
    pub const fn with_ref_clock_hz(mut self, hz: u32) -> Self {
        self.ref_clock_hz = hz;
        self
    }

    /// Set the maximum MDC frequency
    #[must_use]
    pub const fn with_mdio_rate_hz(mut self, hz: u32) -> Self {
        self.mdio_rate_hz = hz;
        self
    }

    /// Set the number of indicator polls per wait
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the delay between indicator polls
    #[must_use]
    pub const fn with_poll_delay_us(mut self, us: u32) -> Self {
        self.poll_delay_us = us;
        self
    }
}

impl Default for MdioConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// MII Control Hardware Variants
// =============================================================================

/// MII control block hardware variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MiiCtrlVariant {
    /// Number of port words in the window
    pub port_count: usize,
    /// Whether GMII/RGMII and 1000 Mbps are available
    pub has_gigabit: bool,
}

impl MiiCtrlVariant {
    /// AR7100: two ports, gigabit capable
    pub const AR7100: Self = Self::new(MII_CTRL_PORTS, true);
    /// AR7130: two ports, fast ethernet only
    pub const AR7130: Self = Self::new(MII_CTRL_PORTS, false);

    /// Describe a variant
    pub const fn new(port_count: usize, has_gigabit: bool) -> Self {
        Self {
            port_count,
            has_gigabit,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
