//! Hardware Abstraction Layer
//!
//! Peripheral blocks that talk to the outside world through a bus protocol.
//! Currently this is the MDIO management bus used to reach Ethernet PHYs.

pub mod mdio;

// Re-export commonly used types
pub use mdio::{MdioBus, MdioController, RegisterSnapshot, select_divider};
