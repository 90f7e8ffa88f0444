//! MII control block registry
//!
//! MAC drivers locate the shared [`MiiModeController`] by a stable node id
//! plus the port they sit on. The platform code declares the node when it
//! learns about it and binds the controller once it is ready; a MAC that
//! asks before that gets [`AcquireError::NotReady`] and should retry later.
//!
//! # Example
//!
//! ```ignore
//! static MII_CTRL: MiiModeController<Mmio> = /* ... */;
//! static REGISTRY: MiiCtrlRegistry<'static, Mmio> = MiiCtrlRegistry::new();
//!
//! REGISTRY.bind(0x18070000, &MII_CTRL)?;
//!
//! let handle = REGISTRY.acquire(&MiiCtrlRef::new(0x18070000, 1))?;
//! handle.set_interface(InterfaceMode::Rgmii)?;
//! ```

use crate::constants::DEFAULT_REGISTRY_SLOTS;
use crate::driver::error::{AcquireError, AcquireResult};
use crate::driver::mii_ctrl::{MiiModeController, MiiPortHandle};
use crate::register::RegisterAccess;
use crate::sync::CriticalSectionCell;

// =============================================================================
// Locators
// =============================================================================

/// Reference from a MAC to a port of an MII control block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MiiCtrlRef {
    /// Node id the controller is registered under
    pub node: u32,
    /// Port index on that controller
    pub port: usize,
}

impl MiiCtrlRef {
    /// Create a reference
    pub const fn new(node: u32, port: usize) -> Self {
        Self { node, port }
    }
}

/// Anything a MAC driver can resolve into a [`MiiCtrlRef`]
///
/// Board descriptions, parsed firmware tables and plain refs all work.
pub trait MiiCtrlLocator {
    /// Resolve the reference, or `None` if the consumer has none
    fn mii_ctrl_ref(&self) -> Option<MiiCtrlRef>;
}

impl MiiCtrlLocator for MiiCtrlRef {
    fn mii_ctrl_ref(&self) -> Option<MiiCtrlRef> {
        Some(*self)
    }
}

impl MiiCtrlLocator for Option<MiiCtrlRef> {
    fn mii_ctrl_ref(&self) -> Option<MiiCtrlRef> {
        *self
    }
}

// =============================================================================
// Registry
// =============================================================================

struct Slot<'a, R> {
    node: u32,
    ctrl: Option<&'a MiiModeController<R>>,
}

impl<R> Clone for Slot<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Slot<'_, R> {}

/// Fixed-capacity table of MII control blocks
///
/// Holds up to `N` nodes. All updates and lookups run inside a critical
/// section, so the registry can live in a `static`.
pub struct MiiCtrlRegistry<'a, R, const N: usize = DEFAULT_REGISTRY_SLOTS> {
    slots: CriticalSectionCell<[Option<Slot<'a, R>>; N]>,
}

impl<'a, R, const N: usize> MiiCtrlRegistry<'a, R, N> {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            slots: CriticalSectionCell::new([None; N]),
        }
    }

    /// Number of slots
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of declared nodes
    pub fn len(&self) -> usize {
        self.slots.with(|slots| slots.iter().flatten().count())
    }

    /// Whether no node is declared
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make `node` known without a controller
    ///
    /// Acquiring a declared but unbound node reports
    /// [`AcquireError::NotReady`]. Declaring twice is harmless.
    ///
    /// # Errors
    ///
    /// [`AcquireError::ResourceExhausted`] if every slot is taken.
    pub fn declare(&self, node: u32) -> AcquireResult<()> {
        self.slots.with(|slots| Self::slot_for(slots, node).map(|_| ()))
    }

    /// Attach the controller for `node`, declaring it if needed
    ///
    /// # Errors
    ///
    /// - [`AcquireError::InUse`] if a different controller is already bound
    ///   to `node`, or `ctrl` is already bound to another node
    /// - [`AcquireError::ResourceExhausted`] if every slot is taken
    pub fn bind(&self, node: u32, ctrl: &'a MiiModeController<R>) -> AcquireResult<()> {
        self.slots.with(|slots| {
            // A controller is bound under at most one node
            let bound_elsewhere = slots
                .iter()
                .flatten()
                .any(|s| s.node != node && s.ctrl.is_some_and(|c| core::ptr::eq(c, ctrl)));
            if bound_elsewhere {
                return Err(AcquireError::InUse);
            }

            let slot = Self::slot_for(slots, node)?;
            match slot.ctrl {
                Some(bound) if !core::ptr::eq(bound, ctrl) => Err(AcquireError::InUse),
                _ => {
                    slot.ctrl = Some(ctrl);
                    Ok(())
                }
            }
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("mii_ctrl: node {:#x} bound", node);

        Ok(())
    }

    /// Detach the controller from `node`
    ///
    /// The node stays declared, so later acquires report
    /// [`AcquireError::NotReady`] again.
    ///
    /// # Errors
    ///
    /// - [`AcquireError::NotFound`] if `node` was never declared
    /// - [`AcquireError::InUse`] while port handles are live
    pub fn unbind(&self, node: u32) -> AcquireResult<&'a MiiModeController<R>> {
        self.slots.with(|slots| {
            let slot = slots
                .iter_mut()
                .flatten()
                .find(|s| s.node == node)
                .ok_or(AcquireError::NotFound)?;
            let ctrl = slot.ctrl.ok_or(AcquireError::NotReady)?;
            if ctrl.ref_count() > 0 {
                return Err(AcquireError::InUse);
            }
            slot.ctrl = None;
            Ok(ctrl)
        })
    }

    /// Look up the controller bound to `node`
    ///
    /// # Errors
    ///
    /// - [`AcquireError::NotFound`] if `node` was never declared
    /// - [`AcquireError::NotReady`] if no controller is bound yet
    pub fn lookup(&self, node: u32) -> AcquireResult<&'a MiiModeController<R>> {
        self.slots.with(|slots| Self::find(slots, node))
    }

    fn find(
        slots: &[Option<Slot<'a, R>>; N],
        node: u32,
    ) -> AcquireResult<&'a MiiModeController<R>> {
        slots
            .iter()
            .flatten()
            .find(|s| s.node == node)
            .ok_or(AcquireError::NotFound)?
            .ctrl
            .ok_or(AcquireError::NotReady)
    }

    /// Existing slot for `node`, or a newly claimed one
    fn slot_for<'s>(
        slots: &'s mut [Option<Slot<'a, R>>; N],
        node: u32,
    ) -> AcquireResult<&'s mut Slot<'a, R>> {
        let index = match slots.iter().position(|s| s.is_some_and(|s| s.node == node)) {
            Some(index) => index,
            None => {
                let index = slots
                    .iter()
                    .position(Option::is_none)
                    .ok_or(AcquireError::ResourceExhausted)?;
                slots[index] = Some(Slot { node, ctrl: None });
                index
            }
        };
        slots[index].as_mut().ok_or(AcquireError::ResourceExhausted)
    }
}

impl<'a, R: RegisterAccess, const N: usize> MiiCtrlRegistry<'a, R, N> {
    /// Get a port handle for the controller `locator` points at
    ///
    /// Lookup and reference counting happen in one critical section, so an
    /// [`unbind`](Self::unbind) can never race a successful acquire.
    ///
    /// # Errors
    ///
    /// - [`AcquireError::NotFound`] if the locator does not resolve or the
    ///   node is unknown
    /// - [`AcquireError::NotReady`] if the node has no controller yet
    /// - [`AcquireError::InvalidPort`] if the port is out of range
    /// - [`AcquireError::ResourceExhausted`] if the reference count is full
    pub fn acquire<L>(&self, locator: &L) -> AcquireResult<MiiPortHandle<'a, R>>
    where
        L: MiiCtrlLocator + ?Sized,
    {
        let Some(r) = locator.mii_ctrl_ref() else {
            #[cfg(feature = "defmt")]
            defmt::error!("mii_ctrl: failed to resolve controller reference");
            return Err(AcquireError::NotFound);
        };

        let result = self.slots.with(|slots| {
            let ctrl = Self::find(slots, r.node)?;
            MiiPortHandle::new(ctrl, r.port)
        });

        #[cfg(feature = "defmt")]
        match &result {
            Ok(_) => defmt::debug!("mii_ctrl: node {:#x} port {} acquired", r.node, r.port),
            Err(AcquireError::NotReady) => {
                defmt::debug!("mii_ctrl: node {:#x} not ready, defer", r.node)
            }
            Err(e) => defmt::warn!(
                "mii_ctrl: node {:#x} port {}: {}",
                r.node,
                r.port,
                e.as_str()
            ),
        }

        result
    }
}

impl<R, const N: usize> Default for MiiCtrlRegistry<'_, R, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, const N: usize> core::fmt::Debug for MiiCtrlRegistry<'_, R, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MiiCtrlRegistry")
            .field("capacity", &N)
            .field("len", &self.slots.try_with(|s| s.iter().flatten().count()))
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::{InterfaceMode, LinkSpeed, MiiCtrlVariant};
    use crate::register::Mmio;
    use crate::test_utils::MockRegisters;

    type Ctrl<'r> = MiiModeController<&'r MockRegisters>;

    const NODE: u32 = 0x1807_0000;

    fn ctrl(regs: &MockRegisters) -> Ctrl<'_> {
        MiiModeController::new(regs, MiiCtrlVariant::AR7100)
    }

    #[test]
    fn unknown_node_is_not_found() {
        let registry: MiiCtrlRegistry<'_, &MockRegisters> = MiiCtrlRegistry::new();

        assert_eq!(
            registry.acquire(&MiiCtrlRef::new(NODE, 0)).map(|_| ()),
            Err(AcquireError::NotFound)
        );
        assert_eq!(registry.lookup(NODE).map(|_| ()), Err(AcquireError::NotFound));
    }

    #[test]
    fn unresolved_locator_is_not_found() {
        let regs = MockRegisters::new();
        let ctrl = ctrl(&regs);
        let registry: MiiCtrlRegistry<'_, _> = MiiCtrlRegistry::new();
        registry.bind(NODE, &ctrl).unwrap();

        let missing: Option<MiiCtrlRef> = None;
        assert_eq!(
            registry.acquire(&missing).map(|_| ()),
            Err(AcquireError::NotFound)
        );
        assert_eq!(ctrl.ref_count(), 0);
    }

    #[test]
    fn declared_but_unbound_is_not_ready() {
        let regs = MockRegisters::new();
        let ctrl = ctrl(&regs);
        let registry: MiiCtrlRegistry<'_, _> = MiiCtrlRegistry::new();

        registry.declare(NODE).unwrap();
        let err = registry.acquire(&MiiCtrlRef::new(NODE, 0)).map(|_| ());
        assert_eq!(err, Err(AcquireError::NotReady));
        assert!(AcquireError::NotReady.is_retryable());

        // Binding later makes the retry succeed
        registry.bind(NODE, &ctrl).unwrap();
        assert!(registry.acquire(&MiiCtrlRef::new(NODE, 0)).is_ok());
    }

    #[test]
    fn bad_port_is_invalid() {
        let regs = MockRegisters::new();
        let ctrl = ctrl(&regs);
        let registry: MiiCtrlRegistry<'_, _> = MiiCtrlRegistry::new();
        registry.bind(NODE, &ctrl).unwrap();

        assert_eq!(
            registry.acquire(&MiiCtrlRef::new(NODE, 2)).map(|_| ()),
            Err(AcquireError::InvalidPort)
        );
        assert_eq!(ctrl.ref_count(), 0);
    }

    #[test]
    fn two_ports_share_one_controller() {
        let regs = MockRegisters::new();
        let ctrl = ctrl(&regs);
        let registry: MiiCtrlRegistry<'_, _> = MiiCtrlRegistry::new();
        registry.bind(NODE, &ctrl).unwrap();

        let h0 = registry.acquire(&MiiCtrlRef::new(NODE, 0)).unwrap();
        let h1 = registry.acquire(&MiiCtrlRef::new(NODE, 1)).unwrap();

        assert!(core::ptr::eq(h0.controller(), h1.controller()));
        assert!(core::ptr::eq(h0.controller(), &ctrl));
        assert_eq!(ctrl.ref_count(), 2);

        h0.release();
        assert_eq!(ctrl.ref_count(), 1);

        h1.set_interface(InterfaceMode::Rgmii).unwrap();
        h1.set_link_speed(LinkSpeed::Mbps1000).unwrap();
        assert_eq!(h1.interface(), Ok(InterfaceMode::Rgmii));

        drop(h1);
        assert_eq!(ctrl.ref_count(), 0);
    }

    #[test]
    fn same_port_can_be_acquired_twice() {
        let regs = MockRegisters::new();
        let ctrl = ctrl(&regs);
        let registry: MiiCtrlRegistry<'_, _> = MiiCtrlRegistry::new();
        registry.bind(NODE, &ctrl).unwrap();

        let a = registry.acquire(&MiiCtrlRef::new(NODE, 0)).unwrap();
        let b = registry.acquire(&MiiCtrlRef::new(NODE, 0)).unwrap();
        assert_eq!(ctrl.ref_count(), 2);
        drop((a, b));
        assert_eq!(ctrl.ref_count(), 0);
    }

    #[test]
    fn unbind_refused_while_in_use() {
        let regs = MockRegisters::new();
        let ctrl = ctrl(&regs);
        let registry: MiiCtrlRegistry<'_, _> = MiiCtrlRegistry::new();
        registry.bind(NODE, &ctrl).unwrap();

        let handle = registry.acquire(&MiiCtrlRef::new(NODE, 0)).unwrap();
        assert_eq!(registry.unbind(NODE).map(|_| ()), Err(AcquireError::InUse));

        handle.release();
        let unbound = registry.unbind(NODE).unwrap();
        assert!(core::ptr::eq(unbound, &ctrl));

        // Node stays declared
        assert_eq!(registry.lookup(NODE).map(|_| ()), Err(AcquireError::NotReady));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unbind_unknown_node() {
        let registry: MiiCtrlRegistry<'_, &MockRegisters> = MiiCtrlRegistry::new();
        assert_eq!(registry.unbind(NODE).map(|_| ()), Err(AcquireError::NotFound));

        registry.declare(NODE).unwrap();
        assert_eq!(registry.unbind(NODE).map(|_| ()), Err(AcquireError::NotReady));
    }

    #[test]
    fn rebinding_other_controller_is_refused() {
        let regs_a = MockRegisters::new();
        let regs_b = MockRegisters::new();
        let a = ctrl(&regs_a);
        let b = ctrl(&regs_b);
        let registry: MiiCtrlRegistry<'_, _> = MiiCtrlRegistry::new();

        registry.bind(NODE, &a).unwrap();
        registry.bind(NODE, &a).unwrap();
        assert_eq!(registry.bind(NODE, &b), Err(AcquireError::InUse));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn full_registry_is_exhausted() {
        let regs = MockRegisters::new();
        let ctrl = ctrl(&regs);
        let registry: MiiCtrlRegistry<'_, _, 2> = MiiCtrlRegistry::new();

        registry.declare(1).unwrap();
        registry.bind(2, &ctrl).unwrap();
        assert_eq!(registry.declare(3), Err(AcquireError::ResourceExhausted));
        assert_eq!(registry.bind(3, &ctrl), Err(AcquireError::ResourceExhausted));

        // Existing nodes still work
        registry.declare(1).unwrap();
        registry.bind(1, &ctrl).unwrap();
        assert_eq!(registry.len(), registry.capacity());
    }

    #[test]
    fn static_registry() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<MiiModeController<Mmio>>();
        assert_sync::<MiiCtrlRegistry<'static, Mmio>>();

        static REGISTRY: MiiCtrlRegistry<'static, Mmio, 4> = MiiCtrlRegistry::new();

        assert!(REGISTRY.is_empty());
        assert_eq!(REGISTRY.capacity(), 4);
    }

    #[test]
    fn controller_binds_to_one_node_only() {
        let regs = MockRegisters::new();
        let ctrl = ctrl(&regs);
        let registry: MiiCtrlRegistry<'_, _, 4> = MiiCtrlRegistry::new();

        registry.bind(NODE, &ctrl).unwrap();
        assert_eq!(registry.bind(NODE + 1, &ctrl), Err(AcquireError::InUse));
        assert_eq!(
            registry.lookup(NODE + 1).map(|_| ()),
            Err(AcquireError::NotFound)
        );

        // Handles on the bound node are the only ones that block unbind
        let handle = registry.acquire(&MiiCtrlRef::new(NODE, 1)).unwrap();
        assert_eq!(registry.unbind(NODE).map(|_| ()), Err(AcquireError::InUse));
        handle.release();
        registry.unbind(NODE).unwrap();

        // Once detached it can move to another node
        registry.bind(NODE + 1, &ctrl).unwrap();
        assert!(registry.acquire(&MiiCtrlRef::new(NODE + 1, 0)).is_ok());
    }
}
