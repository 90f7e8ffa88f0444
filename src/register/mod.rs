//! Memory-mapped register definitions for the AR71xx MDIO and MII control blocks
//!
//! Both controllers reach their hardware through [`RegisterAccess`], a
//! 32-bit register window addressed by byte offset. On hardware this is
//! [`Mmio`]; on the host any register double can stand in.
//! All hardware access is volatile to ensure proper hardware interaction.

pub mod mdio;
pub mod mii_ctrl;

/// Read a 32-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn read_reg(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// Write a 32-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn write_reg(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

// =============================================================================
// Register Window Abstraction
// =============================================================================

/// A window of 32-bit registers addressed by byte offset
///
/// Values are always 32 bits wide; callers mask them to the documented
/// field widths.
pub trait RegisterAccess {
    /// Read the register at `offset` bytes from the window base
    fn read(&self, offset: usize) -> u32;

    /// Write the register at `offset` bytes from the window base
    fn write(&self, offset: usize, value: u32);

    /// Read-modify-write the register at `offset`
    #[inline]
    fn modify<F>(&self, offset: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = self.read(offset);
        self.write(offset, f(value));
    }
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for &T {
    #[inline]
    fn read(&self, offset: usize) -> u32 {
        (**self).read(offset)
    }

    #[inline]
    fn write(&self, offset: usize, value: u32) {
        (**self).write(offset, value);
    }
}

/// Volatile access to a mapped register window
///
/// Not `Clone`: one `Mmio` owns its window.
#[derive(Debug)]
pub struct Mmio {
    base: usize,
    size: usize,
}

impl Mmio {
    /// Wrap an already mapped register window
    ///
    /// # Safety
    /// `base` must be the 4-byte aligned start of a mapped register window
    /// at least `size` bytes long, and no other code may write registers
    /// inside it for the lifetime of the returned value.
    pub const unsafe fn new(base: usize, size: usize) -> Self {
        Self { base, size }
    }

    /// Base address of the window
    pub const fn base(&self) -> usize {
        self.base
    }

    /// Size of the window in bytes
    pub const fn size(&self) -> usize {
        self.size
    }
}

impl RegisterAccess for Mmio {
    #[inline(always)]
    fn read(&self, offset: usize) -> u32 {
        debug_assert!(offset + 4 <= self.size);
        // SAFETY: `Mmio::new` guarantees every aligned offset inside the window is mapped.
        unsafe { read_reg(self.base + offset) }
    }

    #[inline(always)]
    fn write(&self, offset: usize, value: u32) {
        debug_assert!(offset + 4 <= self.size);
        // SAFETY: `Mmio::new` guarantees every aligned offset inside the window is mapped.
        unsafe { write_reg(self.base + offset, value) }
    }
}
