//! Interrupt Controller Bring-up
//!
//! The bring-up sequencer only needs one thing from the interrupt
//! controller: that it comes alive after its register windows are mapped.
//! The [`InterruptController`] trait is that seam; the real GICv2 driver
//! behind it is built on the `arm-gic` crate and lives behind
//! `target_arch = "aarch64"`.

/// Interface the bring-up sequencer drives.
pub trait InterruptController {
    /// Bring the controller up at its mapped register windows.
    ///
    /// Called exactly once, after the distributor and CPU-interface windows
    /// have been mapped (or at least attempted; see the sequencer's
    /// continue-on-failure contract).
    fn init(&mut self);
}

#[cfg(target_arch = "aarch64")]
mod driver {
    use arm_gic::gicv2::GicV2;
    use arm_gic::gicv2::registers::{Gicc, Gicd};
    use tern_common::VirtAddr;

    use super::InterruptController;
    use crate::config;

    /// GICv2 driver bound to the board's fixed device windows.
    pub struct GicDriver {
        gic: Option<GicV2<'static>>,
    }

    // SAFETY: The driver owns the only references to the GIC windows and is
    // itself kept behind a lock by the platform wiring.
    unsafe impl Send for GicDriver {}

    impl GicDriver {
        /// Create the driver; nothing touches hardware until `init`.
        #[must_use]
        pub const fn new() -> Self {
            Self { gic: None }
        }
    }

    impl InterruptController for GicDriver {
        fn init(&mut self) {
            let gicd_ptr = VirtAddr::new(config::GICD_VIRT).as_mut_ptr::<Gicd>();
            let gicc_ptr = VirtAddr::new(config::GICC_VIRT).as_mut_ptr::<Gicc>();

            // SAFETY: The device-init stage mapped both windows as device
            // memory at these addresses, and no other code accesses the
            // registers during bring-up.
            let mut gic = unsafe { GicV2::new(gicd_ptr, gicc_ptr) };

            gic.setup();
            gic.set_priority_mask(0xFF); // Accept all priorities

            self.gic = Some(gic);
            log::trace!(
                "gic distributor live at {}",
                VirtAddr::new(config::GICD_VIRT)
            );
        }
    }
}

#[cfg(target_arch = "aarch64")]
pub use driver::GicDriver;
