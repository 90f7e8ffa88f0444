//! MII Control Register Definitions
//!
//! One 32-bit word per MAC port, laid out at a fixed stride. Each word
//! carries the interface select field (bits 1:0) and the speed field
//! (bits 5:4); every other bit is reserved and written as zero.

/// Byte distance between two port words
pub const MII_CTRL_PORT_STRIDE: usize = 4;

/// Interface select field shift
pub const MII_CTRL_SELECT_SHIFT: u32 = 0;
/// Interface select field mask (before shifting)
pub const MII_CTRL_SELECT_MASK: u32 = 0x3;
/// Port 1 only implements bit 0 of the select field
pub const MII_CTRL_SELECT_PORT1_MASK: u32 = 0x1;

/// Select code: GMII
pub const MII_CTRL_SELECT_GMII: u32 = 0;
/// Select code: MII
pub const MII_CTRL_SELECT_MII: u32 = 1;
/// Select code: RGMII
pub const MII_CTRL_SELECT_RGMII: u32 = 2;
/// Select code: RMII
pub const MII_CTRL_SELECT_RMII: u32 = 3;

/// Speed field shift
pub const MII_CTRL_SPEED_SHIFT: u32 = 4;
/// Speed field mask (before shifting)
pub const MII_CTRL_SPEED_MASK: u32 = 0x3;

/// Speed code: 10 Mbps
pub const MII_CTRL_SPEED_10: u32 = 0;
/// Speed code: 100 Mbps
pub const MII_CTRL_SPEED_100: u32 = 1;
/// Speed code: 1000 Mbps
pub const MII_CTRL_SPEED_1000: u32 = 2;

/// Byte offset of a port's control word
#[inline(always)]
pub const fn port_offset(port: usize) -> usize {
    port * MII_CTRL_PORT_STRIDE
}

/// Extract the select field from a control word
#[inline(always)]
pub const fn select_field(word: u32) -> u32 {
    (word >> MII_CTRL_SELECT_SHIFT) & MII_CTRL_SELECT_MASK
}

/// Extract the speed field from a control word
#[inline(always)]
pub const fn speed_field(word: u32) -> u32 {
    (word >> MII_CTRL_SPEED_SHIFT) & MII_CTRL_SPEED_MASK
}

/// Build a control word; reserved bits are zero
#[inline(always)]
pub const fn compose(select: u32, speed: u32) -> u32 {
    ((select & MII_CTRL_SELECT_MASK) << MII_CTRL_SELECT_SHIFT)
        | ((speed & MII_CTRL_SPEED_MASK) << MII_CTRL_SPEED_SHIFT)
}
