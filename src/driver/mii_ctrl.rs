//! MII mode control block
//!
//! The AR71xx family routes each MAC to its PHY through a small shared
//! block holding one 32-bit word per port. The word selects the electrical
//! interface and the link speed the MAC side runs at.
//!
//! Several MAC drivers touch the same block, so the controller is shared by
//! reference and every read-modify-write of a port word runs inside a
//! critical section. MAC drivers never hold the controller directly; they
//! hold a [`MiiPortHandle`] for their port, obtained from a
//! [`MiiCtrlRegistry`](super::registry::MiiCtrlRegistry).
//!
//! # Port restrictions
//!
//! | Interface | Port 0 | Port 1 | Needs gigabit variant | Max speed |
//! |-----------|--------|--------|-----------------------|-----------|
//! | GMII      | yes    | no     | yes                   | 1000      |
//! | MII       | yes    | no     | no                    | 100       |
//! | RGMII     | yes    | yes    | yes                   | 1000      |
//! | RMII      | yes    | yes    | no                    | 100       |

use crate::driver::config::{InterfaceMode, LinkSpeed, MiiCtrlVariant};
use crate::driver::error::{AcquireError, AcquireResult, ConfigError, ConfigResult, Result};
use crate::register::RegisterAccess;
use crate::register::mii_ctrl::{
    MII_CTRL_SELECT_PORT1_MASK, MII_CTRL_SPEED_100, compose, port_offset, select_field,
    speed_field,
};
use crate::sync::CriticalSectionCell;

// =============================================================================
// Controller
// =============================================================================

/// Shared MII mode controller
///
/// Usually placed in a `static` and bound into a registry by the platform
/// code. The controller outlives every [`MiiPortHandle`] that borrows it.
///
/// # Example
///
/// ```ignore
/// static MII_CTRL: MiiModeController<Mmio> =
///     MiiModeController::new(unsafe { Mmio::new(0x1807_0000, 8) }, MiiCtrlVariant::AR7100);
///
/// MII_CTRL.set_interface(0, InterfaceMode::Rgmii)?;
/// MII_CTRL.set_speed(0, 1000)?;
/// ```
pub struct MiiModeController<R> {
    regs: CriticalSectionCell<R>,
    variant: MiiCtrlVariant,
    refs: CriticalSectionCell<usize>,
}

impl<R> MiiModeController<R> {
    /// Create a controller over a register window
    pub const fn new(regs: R, variant: MiiCtrlVariant) -> Self {
        Self {
            regs: CriticalSectionCell::new(regs),
            variant,
            refs: CriticalSectionCell::new(0),
        }
    }

    /// Hardware variant
    pub fn variant(&self) -> &MiiCtrlVariant {
        &self.variant
    }

    /// Number of live port handles
    pub fn ref_count(&self) -> usize {
        self.refs.with(|n| *n)
    }

    /// Release the register window
    pub fn free(self) -> R {
        self.regs.into_inner()
    }

    /// Take one reference for a new handle
    pub(crate) fn retain(&self) -> AcquireResult<()> {
        self.refs.with(|n| {
            *n = n.checked_add(1).ok_or(AcquireError::ResourceExhausted)?;
            Ok(())
        })
    }

    /// Drop one reference
    pub(crate) fn put(&self) {
        self.refs.with(|n| *n = n.saturating_sub(1));
    }

    fn check_port(&self, port: usize) -> ConfigResult<()> {
        if port >= self.variant.port_count {
            return Err(ConfigError::InvalidPort);
        }
        Ok(())
    }
}

impl<R: RegisterAccess> MiiModeController<R> {
    /// Select the MAC/PHY interface of `port`
    ///
    /// The current speed is kept, except that MII and RMII clamp it to
    /// 100 Mbps.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidPort`] if `port` is out of range
    /// - [`ConfigError::UnsupportedInterface`] for GMII/MII on any port but
    ///   0, or GMII/RGMII on a variant without gigabit
    pub fn set_interface(&self, port: usize, mode: InterfaceMode) -> Result<()> {
        self.check_port(port)?;

        if mode.port0_only() && port > 0 {
            return Err(ConfigError::UnsupportedInterface.into());
        }
        if mode.supports_gigabit() && !self.variant.has_gigabit {
            return Err(ConfigError::UnsupportedInterface.into());
        }

        let mut select = mode.select_code();
        if port == 1 {
            select &= MII_CTRL_SELECT_PORT1_MASK;
        }

        let offset = port_offset(port);
        self.regs.with(|regs| {
            let mut speed = speed_field(regs.read(offset));
            if !mode.supports_gigabit() && speed > MII_CTRL_SPEED_100 {
                speed = MII_CTRL_SPEED_100;
            }
            regs.write(offset, compose(select, speed));
        });

        #[cfg(feature = "defmt")]
        defmt::debug!("mii_ctrl: port {} interface {}", port, mode);

        Ok(())
    }

    /// Set the link speed of `port` in Mbps
    ///
    /// Only 10, 100 and 1000 are accepted. The interface select is kept.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidPort`] if `port` is out of range
    /// - [`ConfigError::UnsupportedSpeed`] for any other rate, or 1000 with
    ///   MII/RMII selected or on a variant without gigabit
    pub fn set_speed(&self, port: usize, mbps: u32) -> Result<()> {
        let speed = LinkSpeed::from_mbps(mbps).ok_or(ConfigError::UnsupportedSpeed)?;
        self.set_link_speed(port, speed)
    }

    /// Set the link speed of `port`
    ///
    /// Same rules as [`set_speed`](Self::set_speed).
    pub fn set_link_speed(&self, port: usize, speed: LinkSpeed) -> Result<()> {
        self.check_port(port)?;

        if speed == LinkSpeed::Mbps1000 && !self.variant.has_gigabit {
            return Err(ConfigError::UnsupportedSpeed.into());
        }

        let offset = port_offset(port);
        self.regs.with(|regs| {
            let select = select_field(regs.read(offset));
            if speed == LinkSpeed::Mbps1000
                && !InterfaceMode::from_select(port, select).supports_gigabit()
            {
                return Err(ConfigError::UnsupportedSpeed);
            }
            regs.write(offset, compose(select, speed.speed_code()));
            Ok(())
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("mii_ctrl: port {} speed {} Mbps", port, speed.mbps());

        Ok(())
    }

    /// Interface currently selected on `port`
    pub fn interface(&self, port: usize) -> ConfigResult<InterfaceMode> {
        self.check_port(port)?;
        let word = self.regs.with(|regs| regs.read(port_offset(port)));
        Ok(InterfaceMode::from_select(port, select_field(word)))
    }

    /// Speed currently programmed on `port`; `None` for the reserved code
    pub fn speed(&self, port: usize) -> ConfigResult<Option<LinkSpeed>> {
        self.check_port(port)?;
        let word = self.regs.with(|regs| regs.read(port_offset(port)));
        Ok(LinkSpeed::from_speed_code(speed_field(word)))
    }
}

impl<R> core::fmt::Debug for MiiModeController<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MiiModeController")
            .field("variant", &self.variant)
            .field("refs", &self.refs.try_with(|n| *n))
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Port Handle
// =============================================================================

/// One MAC's view of the shared controller
///
/// Holds a reference on the controller for as long as it lives. Dropping the
/// handle (or calling [`release`](Self::release)) gives the reference back.
pub struct MiiPortHandle<'a, R: RegisterAccess> {
    ctrl: &'a MiiModeController<R>,
    port: usize,
}

impl<'a, R: RegisterAccess> MiiPortHandle<'a, R> {
    /// Take a reference on `ctrl` for `port`
    pub(crate) fn new(ctrl: &'a MiiModeController<R>, port: usize) -> AcquireResult<Self> {
        if port >= ctrl.variant.port_count {
            return Err(AcquireError::InvalidPort);
        }
        ctrl.retain()?;
        Ok(Self { ctrl, port })
    }

    /// Shared controller behind this handle
    pub fn controller(&self) -> &'a MiiModeController<R> {
        self.ctrl
    }

    /// Port this handle drives
    pub fn port(&self) -> usize {
        self.port
    }

    /// See [`MiiModeController::set_interface`]
    pub fn set_interface(&self, mode: InterfaceMode) -> Result<()> {
        self.ctrl.set_interface(self.port, mode)
    }

    /// See [`MiiModeController::set_speed`]
    pub fn set_speed(&self, mbps: u32) -> Result<()> {
        self.ctrl.set_speed(self.port, mbps)
    }

    /// See [`MiiModeController::set_link_speed`]
    pub fn set_link_speed(&self, speed: LinkSpeed) -> Result<()> {
        self.ctrl.set_link_speed(self.port, speed)
    }

    /// See [`MiiModeController::interface`]
    pub fn interface(&self) -> ConfigResult<InterfaceMode> {
        self.ctrl.interface(self.port)
    }

    /// See [`MiiModeController::speed`]
    pub fn speed(&self) -> ConfigResult<Option<LinkSpeed>> {
        self.ctrl.speed(self.port)
    }

    /// Give the handle back
    pub fn release(self) {
        drop(self);
    }
}

impl<R: RegisterAccess> Drop for MiiPortHandle<'_, R> {
    fn drop(&mut self) {
        self.ctrl.put();

        #[cfg(feature = "defmt")]
        defmt::debug!("mii_ctrl: port {} handle released", self.port);
    }
}

impl<R: RegisterAccess> core::fmt::Debug for MiiPortHandle<'_, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MiiPortHandle")
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
