//! MII Management (MDIO) Register Definitions
//!
//! The management block lives at offset 0x20 of the MAC register window.
//! All registers are 32 bits wide; only the documented fields are used.

// =============================================================================
// Register Offsets
// =============================================================================

/// MII Configuration register offset (reset bit + MDC divider code)
pub const MII_CFG_OFFSET: usize = 0x20;
/// MII Command register offset (read/write mode)
pub const MII_CMD_OFFSET: usize = 0x24;
/// MII Address register offset (device + register address)
pub const MII_ADDR_OFFSET: usize = 0x28;
/// MII Control register offset (write data, starts a write transaction)
pub const MII_CTRL_OFFSET: usize = 0x2C;
/// MII Status register offset (read data)
pub const MII_STATUS_OFFSET: usize = 0x30;
/// MII Indicator register offset (busy/invalid flags)
pub const MII_IND_OFFSET: usize = 0x34;

// =============================================================================
// MII_CFG bits
// =============================================================================

/// Soft reset of the management block
pub const MII_CFG_RESET: u32 = 1 << 31;
/// MDC clock divider code field (bits 3:0)
pub const MII_CFG_DIV_MASK: u32 = 0xF;

// =============================================================================
// MII_CMD values
// =============================================================================

/// Write mode; also the idle/address phase
pub const MII_CMD_WRITE: u32 = 0x0;
/// Read mode; setting it starts a read transaction
pub const MII_CMD_READ: u32 = 0x1;

// =============================================================================
// MII_ADDR fields
// =============================================================================

/// Device (PHY) address shift (bits 15:8)
pub const MII_ADDR_SHIFT: u32 = 8;
/// Register address mask (bits 7:0)
pub const MII_ADDR_REG_MASK: u32 = 0xFF;
/// Device address mask, before shifting
pub const MII_ADDR_DEV_MASK: u32 = 0xFF;

// =============================================================================
// MII_CTRL / MII_STATUS fields
// =============================================================================

/// PHY register data field (bits 15:0)
pub const MII_DATA_MASK: u32 = 0xFFFF;

// =============================================================================
// MII_IND bits
// =============================================================================

/// Transaction in progress
pub const MII_IND_BUSY: u32 = 1 << 0;
/// Last transaction was invalid
pub const MII_IND_INVALID: u32 = 1 << 2;

/// Pack a device/register address pair into the MII_ADDR layout
#[inline(always)]
pub const fn mii_addr(dev_addr: u8, reg_addr: u8) -> u32 {
    (((dev_addr as u32) & MII_ADDR_DEV_MASK) << MII_ADDR_SHIFT)
        | ((reg_addr as u32) & MII_ADDR_REG_MASK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_match_hardware_layout() {
        assert_eq!(MII_CFG_OFFSET, 0x20);
        assert_eq!(MII_CMD_OFFSET, 0x24);
        assert_eq!(MII_ADDR_OFFSET, 0x28);
        assert_eq!(MII_CTRL_OFFSET, 0x2C);
        assert_eq!(MII_STATUS_OFFSET, 0x30);
        assert_eq!(MII_IND_OFFSET, 0x34);
    }

    #[test]
    fn addr_packs_device_high_register_low() {
        assert_eq!(mii_addr(0x1F, 0x02), 0x1F02);
        assert_eq!(mii_addr(0, 0), 0);
        assert_eq!(mii_addr(0xFF, 0xFF), 0xFFFF);
    }

    #[test]
    fn indicator_bits() {
        assert_eq!(MII_IND_BUSY, 0x1);
        assert_eq!(MII_IND_INVALID, 0x4);
        assert_eq!(MII_CFG_RESET, 0x8000_0000);
    }
}
