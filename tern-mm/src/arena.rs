//! Physical Memory Arenas
//!
//! An arena is the physical memory manager's unit of ownership over a
//! contiguous physical region. Bring-up code builds one [`Arena`] for system
//! RAM and hands it over through [`PhysicalMemory::register_arena`]; from
//! that point the record belongs to the manager and is never touched again
//! by the boot path.

use bitflags::bitflags;
use tern_common::PhysAddr;

bitflags! {
    /// Attributes of a physical memory arena
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ArenaFlags: u32 {
        /// The arena is covered by the kernel's permanent mapping
        const KERNEL_MAP = 1 << 0;
    }
}

/// A contiguous physical memory region owned by the physical memory manager.
#[derive(Debug, Clone, Copy)]
pub struct Arena {
    /// Human-readable region name, used in logs and diagnostics
    pub name: &'static str,
    /// Physical base address
    pub base: PhysAddr,
    /// Size in bytes
    pub size: u64,
    /// Arena attributes
    pub flags: ArenaFlags,
}

impl Arena {
    /// Create an arena record.
    #[must_use]
    pub const fn new(name: &'static str, base: PhysAddr, size: u64, flags: ArenaFlags) -> Self {
        Self {
            name,
            base,
            size,
            flags,
        }
    }

    /// First address past the end of the arena.
    #[must_use]
    pub const fn end(&self) -> PhysAddr {
        PhysAddr::new(self.base.as_u64() + self.size)
    }
}

/// Interface to the physical memory manager.
///
/// Registering an arena transfers ownership of the record: the `Arena` is
/// passed by value, so a caller cannot register the same record twice without
/// deliberately constructing a copy.
pub trait PhysicalMemory {
    /// Hand a physical region over to the manager.
    fn register_arena(&mut self, arena: Arena);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_end() {
        let arena = Arena::new(
            "ram",
            PhysAddr::new(0x8000_0000),
            0x2000_0000,
            ArenaFlags::KERNEL_MAP,
        );
        assert_eq!(arena.end(), PhysAddr::new(0xA000_0000));
    }
}
