//! Synchronization Support
//!
//! The MII control block is shared by several MAC drivers, each holding its
//! own [`MiiPortHandle`](crate::MiiPortHandle). Every read-modify-write of a
//! port word, and every registry update, runs inside a critical section
//! through [`CriticalSectionCell`].
//!
//! The MDIO controller needs no lock: it is owned by exactly one PHY-bus
//! client and all of its operations take `&mut self`.
//!
//! # Example
//!
//! ```ignore
//! use ag71xx_mii::sync::CriticalSectionCell;
//!
//! static COUNTER: CriticalSectionCell<u32> = CriticalSectionCell::new(0);
//!
//! COUNTER.with(|c| *c += 1);
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;
