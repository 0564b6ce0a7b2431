//! Dynamic RAM Region Resolution
//!
//! The board declares a default RAM window at compile time, but the reset
//! path may have patched the mapping table's dynamic entry with the size the
//! hardware actually has. This module reconciles the two and hands the result
//! to the physical memory manager.
//!
//! Registration happens exactly once per boot whatever the scan finds: the
//! [`Arena`] is consumed by value, so there is no second record to register.

use tern_mm::{Arena, ArenaFlags, PhysicalMemory};

use crate::memmap::{self, MappingEntry, MappingFlags};

/// Where the registered RAM window came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RamSource {
    /// The mapping table carried a dynamic entry for the arena
    Discovered,
    /// No dynamic entry matched; compile-time defaults were kept
    Defaults,
}

/// Reconcile the RAM arena with the mapping table and register it.
///
/// Scans `table` in order for the first [`MappingFlags::DYNAMIC`] entry whose
/// name equals the arena's. On a match the entry's base and size replace the
/// arena's defaults and the kernel-map flag is set; without one the defaults
/// stand: a fixed-RAM board is a valid configuration, not an error. Either
/// way the arena is then registered with `pmm`.
pub fn resolve_and_register_ram(
    table: &[MappingEntry],
    mut arena: Arena,
    pmm: &mut dyn PhysicalMemory,
) -> RamSource {
    let mut source = RamSource::Defaults;

    for entry in memmap::entries(table) {
        if !entry.flags.contains(MappingFlags::DYNAMIC) {
            continue;
        }
        if entry.name == arena.name {
            arena.base = entry.phys;
            arena.size = entry.size;
            arena.flags.insert(ArenaFlags::KERNEL_MAP);
            source = RamSource::Discovered;
            break;
        }
    }

    match source {
        RamSource::Discovered => log::info!(
            "ram window from mapping table: {} MB at {}",
            arena.size / (1024 * 1024),
            arena.base
        ),
        RamSource::Defaults => log::info!(
            "ram window from compile-time defaults: {} MB at {}",
            arena.size / (1024 * 1024),
            arena.base
        ),
    }

    pmm.register_arena(arena);
    source
}
