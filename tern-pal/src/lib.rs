//! Platform Bring-up for the Tern Kernel
//!
//! Everything that has to happen between "the architecture bootstrap turned
//! the MMU on" and "drivers and scheduler can exist", in the order it has to
//! happen:
//!
//! 1. [`memmap`]: the static, sentinel-terminated initial mapping table the
//!    bootstrap built page tables from
//! 2. [`ram`]: reconcile the table's dynamic RAM entry with the compile-time
//!    default window and register the arena with the physical memory manager
//! 3. [`bringup`]: once the VM subsystem reports ready, map the console
//!    UART; one level later, locate the interrupt controller through the
//!    secure monitor ([`smc`]), map its windows ([`mmio`]), and bring up the
//!    GIC and generic timer
//!
//! Ordering is safety-critical here: a diagnostic write to an unmapped
//! UART or a GIC access before firmware has been asked where the GIC *is*
//! corrupts boot, and nothing can recover this early. The sequencer makes
//! those constraints structural rather than conventional.
//!
//! The memory managers, drivers, and the SMC transport are reached only
//! through traits; their implementations live elsewhere (the aarch64
//! adapters in [`gic`], [`timer`] and [`smc`] are the hardware ends of those
//! seams).

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod bringup;
pub mod config;
pub mod gic;
pub mod memmap;
pub mod mmio;
pub mod platform;
pub mod ram;
pub mod smc;
pub mod timer;

#[cfg(test)]
mod testing;

pub use bringup::{
    BootContext, BringupConfig, BringupError, BringupSequencer, InitLevel, STAGE_CONSOLE_MAP,
    STAGE_DEVICE_INIT, StageInfo,
};
pub use gic::InterruptController;
pub use memmap::{MappingEntry, MappingFlags};
pub use mmio::{map_console, map_device};
pub use ram::{RamSource, resolve_and_register_ram};
pub use smc::{LocateError, RegisterBlock, SecureMonitor, locate_register_base};
pub use timer::SystemTimer;
