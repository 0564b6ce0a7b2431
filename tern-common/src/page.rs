//! Translation Granule Constants
//!
//! The kernel uses a fixed 4KB granule throughout.

/// Page size in bytes
pub const SIZE: usize = 4096;

/// Page shift (log2 of [`SIZE`])
pub const SHIFT: usize = 12;

/// Page offset mask, as `u64` so it composes with address arithmetic
pub const MASK: u64 = (SIZE as u64) - 1;

// Compile-time verification of page constants
const _: () = assert!(SIZE.is_power_of_two(), "page size must be a power of two");
const _: () = assert!(1 << SHIFT == SIZE, "SHIFT must match SIZE");
const _: () = assert!(MASK == SIZE as u64 - 1, "MASK must be SIZE - 1");

/// Align an address down to a page boundary.
#[must_use]
pub const fn align_down(addr: u64) -> u64 {
    addr & !MASK
}

/// Align an address up to a page boundary.
#[must_use]
pub const fn align_up(addr: u64) -> u64 {
    (addr + MASK) & !MASK
}

/// Check if an address is page-aligned.
#[must_use]
pub const fn is_aligned(addr: u64) -> bool {
    addr & MASK == 0
}
