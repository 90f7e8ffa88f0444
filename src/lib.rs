//! AR71xx MDIO and MII Control Driver
//!
//! A `no_std`, `no_alloc` Rust implementation of two small blocks found on
//! Atheros AR71xx/AR724x/AR913x/AR933x SoCs that sit between the Ethernet
//! MACs and their PHYs.
//!
//! # Architecture
//!
//! 1. **MDIO Layer** ([`hal::mdio`]): The per-MAC MII management bus, used
//!    to read and write PHY registers
//! 2. **MII Control Layer** ([`driver::mii_ctrl`]): The block shared by all
//!    MACs that selects each port's interface (GMII/MII/RGMII/RMII) and
//!    link speed
//! 3. **Registry** ([`driver::registry`]): Lets several MAC drivers find and
//!    share one MII control block through reference-counted handles
//!
//! Both layers reach hardware through [`register::RegisterAccess`], so they
//! run unchanged against [`register::Mmio`] on target and a register double
//! on the host.
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging and formatting for error and config types
//!
//! # Example
//!
//! ```ignore
//! use ag71xx_mii::{InterfaceMode, MdioBus, MdioConfig, MdioController, MdioVariant};
//! use ag71xx_mii::register::Mmio;
//!
//! let regs = unsafe { Mmio::new(0x1900_0000, 0x200) };
//! let config = MdioConfig::new().with_ref_clock_hz(200_000_000);
//! let mut mdio = MdioController::new(regs, delay, MdioVariant::AR7240, config);
//!
//! mdio.reset()?;
//! let id1 = mdio.read(0, 2)?;
//!
//! let port = REGISTRY.acquire(&MiiCtrlRef::new(MII_CTRL_NODE, 0))?;
//! port.set_interface(InterfaceMode::Rgmii)?;
//! port.set_speed(1000)?;
//! ```

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod constants;
pub mod driver;
pub mod hal;
pub mod register;
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{
    InterfaceMode, LinkSpeed, MdioConfig, MdioDivider, MdioVariant, MiiCtrlVariant,
};
pub use driver::error::{
    AcquireError, AcquireResult, ConfigError, ConfigResult, Error, IoError, IoResult, Result,
};
pub use driver::mii_ctrl::{MiiModeController, MiiPortHandle};
pub use driver::registry::{MiiCtrlLocator, MiiCtrlRef, MiiCtrlRegistry};
pub use hal::mdio::{MdioBus, MdioController, RegisterSnapshot};
