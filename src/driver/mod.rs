//! Core driver components for the AR71xx MII control block.
//!
//! - [`config`] - Interface modes, link speeds, hardware variants and
//!   MDIO bus configuration
//! - [`error`] - Error types and result aliases
//! - [`mii_ctrl`] - The shared MII mode controller and per-port handles
//! - [`registry`] - Locating a controller and handing out port handles
//!
//! # Example
//!
//! ```ignore
//! use ag71xx_mii::driver::{InterfaceMode, MiiCtrlRef, MiiCtrlRegistry};
//!
//! let handle = REGISTRY.acquire(&MiiCtrlRef::new(node, 0))?;
//! handle.set_interface(InterfaceMode::Rgmii)?;
//! handle.set_speed(1000)?;
//! ```

// Submodules
pub mod config;
pub mod error;
pub mod mii_ctrl;
pub mod registry;

// Re-exports for convenience
pub use config::{InterfaceMode, LinkSpeed, MdioConfig, MdioDivider, MdioVariant, MiiCtrlVariant};
pub use error::{
    AcquireError, AcquireResult, ConfigError, ConfigResult, Error, IoError, IoResult, Result,
};
pub use mii_ctrl::{MiiModeController, MiiPortHandle};
pub use registry::{MiiCtrlLocator, MiiCtrlRef, MiiCtrlRegistry};
