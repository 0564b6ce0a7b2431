//! System Timer Bring-up
//!
//! Last step of device bring-up: the ARM generic timer. The interrupt line
//! it fires on is a board fact fixed at build time
//! ([`crate::config::TIMER_IRQ`]); which physical registers back it is an
//! architecture fact handled by the aarch64 driver below. Everything the
//! sequencer sees is the [`SystemTimer`] trait.

/// Interface the bring-up sequencer drives.
pub trait SystemTimer {
    /// Bring the timer up on the given interrupt line.
    ///
    /// The timer is left disabled; the scheduler arms the first tick once it
    /// takes over.
    fn init(&mut self, irq: u32);
}

#[cfg(target_arch = "aarch64")]
mod driver {
    use aarch64_cpu::registers::{CNTFRQ_EL0, CNTV_CTL_EL0};
    use tock_registers::interfaces::{Readable, Writeable};

    use super::SystemTimer;

    /// ARM generic timer (virtual counter view).
    pub struct GenericTimer {
        freq: u64,
        irq: u32,
    }

    impl GenericTimer {
        /// Create the driver; nothing touches hardware until `init`.
        #[must_use]
        pub const fn new() -> Self {
            Self { freq: 0, irq: 0 }
        }

        /// Counter frequency in Hz, as read at init.
        #[must_use]
        pub fn frequency(&self) -> u64 {
            self.freq
        }

        /// Interrupt line the timer was brought up on.
        #[must_use]
        pub fn irq(&self) -> u32 {
            self.irq
        }
    }

    impl SystemTimer for GenericTimer {
        fn init(&mut self, irq: u32) {
            self.freq = CNTFRQ_EL0.get();
            self.irq = irq;

            // Disabled until the scheduler arms the first tick
            CNTV_CTL_EL0.set(0);

            log::trace!("generic timer: {} Hz, irq {}", self.freq, irq);
        }
    }
}

#[cfg(target_arch = "aarch64")]
pub use driver::GenericTimer;
