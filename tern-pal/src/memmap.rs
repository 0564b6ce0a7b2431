//! Initial Mapping Table
//!
//! Before the VM subsystem exists, the architecture bootstrap builds its
//! first page tables from a flat table of [`MappingEntry`] records. The table
//! is terminated by a single all-zero sentinel entry; consumers walk until
//! they hit it and never rely on a known length. The same table is re-scanned
//! later by the RAM resolver looking for the [`MappingFlags::DYNAMIC`] entry.

use bitflags::bitflags;
use tern_common::{PhysAddr, VirtAddr};

bitflags! {
    /// Kind of an initial mapping
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MappingFlags: u32 {
        /// Device register window: uncached, no speculation
        const DEVICE = 1 << 0;
        /// The reset path may overwrite this entry's base and size with the
        /// hardware-reported values before the resolver runs
        const DYNAMIC = 1 << 1;
    }
}

/// One physical-to-virtual mapping consumed before the MMU is live.
#[derive(Debug, Clone, Copy)]
pub struct MappingEntry {
    /// Physical base address
    pub phys: PhysAddr,
    /// Virtual base address
    pub virt: VirtAddr,
    /// Size in bytes
    pub size: u64,
    /// Mapping kind
    pub flags: MappingFlags,
    /// Entry name; matched by the RAM resolver
    pub name: &'static str,
}

impl MappingEntry {
    /// The all-zero terminator every mapping table ends with.
    pub const SENTINEL: Self = Self {
        phys: PhysAddr::new(0),
        virt: VirtAddr::new(0),
        size: 0,
        flags: MappingFlags::empty(),
        name: "",
    };

    /// Check whether this entry is the table terminator.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        self.phys.as_u64() == 0
            && self.virt.as_u64() == 0
            && self.size == 0
            && self.flags.bits() == 0
            && self.name.is_empty()
    }
}

/// Walk a mapping table up to (and excluding) its sentinel.
///
/// Entries past the sentinel, if any, are never touched.
pub fn entries(table: &[MappingEntry]) -> impl Iterator<Item = &MappingEntry> {
    table.iter().take_while(|entry| !entry.is_sentinel())
}
