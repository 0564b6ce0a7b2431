//! Board Configuration
//!
//! Compile-time facts about the board: the kernel's virtual home, the default
//! RAM window (secure firmware may report a different one at reset), fixed
//! device windows, and the generic-timer interrupt line selected by cargo
//! feature.
//!
//! Everything here is a constant. Values that can only be known at runtime
//! (the interrupt controller's physical bases) are discovered through
//! [`crate::smc`] instead.

use tern_common::page;

/// Virtual base of the kernel image
pub const KERNEL_BASE: u64 = 0xFFFF_FFFF_8000_0000;

/// Offset of the kernel image within the RAM window
pub const KERNEL_LOAD_OFFSET: u64 = 0x0008_0000;

/// Physical base of system RAM
pub const RAM_BASE: u64 = 0x8000_0000;

/// Default RAM size, used when the reset path reports nothing better
pub const RAM_SIZE_DEFAULT: u64 = 512 * 1024 * 1024;

/// Name of the RAM arena and of its dynamic mapping-table entry
pub const RAM_ARENA_NAME: &str = "ram";

/// Physical base of the boot console UART
pub const UART0_BASE: u64 = 0x0900_0000;

/// Size of the UART register window
pub const UART0_SIZE: u64 = 0x1000;

/// Pre-VM virtual address of the UART, used by the initial mapping table
pub const UART0_VIRT: u64 = KERNEL_BASE + KERNEL_LOAD_OFFSET + UART0_BASE;

/// Base of the kernel's fixed device window
const DEVICE_VIRT_BASE: u64 = 0xFFFF_FFFF_C000_0000;

/// Fixed virtual address of the GIC distributor
pub const GICD_VIRT: u64 = DEVICE_VIRT_BASE;

/// Size of the GIC distributor register window
pub const GICD_SIZE: usize = 0x1000;

/// Fixed virtual address of the GIC CPU interface
pub const GICC_VIRT: u64 = DEVICE_VIRT_BASE + 0x1_0000;

/// Size of the GIC CPU interface register window (includes GICC_DIR page)
pub const GICC_SIZE: usize = 0x2000;

/// Upper bound of the board's physical address space (40-bit PA)
pub const PHYS_ADDR_LIMIT: u64 = 1 << 40;

/// Debug UART selected before the VM stages run
pub const DEFAULT_DEBUG_UART: u32 = 0;

cfg_if::cfg_if! {
    if #[cfg(feature = "timer-phys")] {
        /// Generic-timer interrupt: EL1 physical timer
        pub const TIMER_IRQ: u32 = 30;
    } else if #[cfg(feature = "timer-sec-phys")] {
        /// Generic-timer interrupt: secure physical timer
        pub const TIMER_IRQ: u32 = 29;
    } else {
        /// Generic-timer interrupt: virtual timer
        pub const TIMER_IRQ: u32 = 27;
    }
}

// The device windows and RAM defaults must sit on page boundaries; the
// bring-up stages rely on it.
const _: () = assert!(page::is_aligned(RAM_BASE), "RAM base must be page-aligned");
const _: () = assert!(
    page::is_aligned(RAM_SIZE_DEFAULT),
    "default RAM size must be page-aligned"
);
const _: () = assert!(page::is_aligned(GICD_VIRT), "GICD window must be page-aligned");
const _: () = assert!(page::is_aligned(GICC_VIRT), "GICC window must be page-aligned");
const _: () = assert!(
    GICD_VIRT + GICD_SIZE as u64 <= GICC_VIRT,
    "GIC windows must not overlap"
);
