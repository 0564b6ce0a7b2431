//! Virtual Memory Manager Interface
//!
//! Bring-up code asks the kernel VM manager to back virtual ranges with
//! specific physical memory: device register windows at fixed virtual
//! addresses, and the console UART wherever the allocator likes as long as
//! the result is page-aligned. Both shapes go through one request type.

use tern_common::{PhysAddr, VirtAddr};

/// Cacheability of a mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Normal memory (cacheable, speculative access allowed)
    #[default]
    Normal,
    /// Device memory (non-cacheable, no speculation, ordered access)
    Device,
}

/// Where the mapping should land in the virtual address space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtSlot {
    /// Map at exactly this virtual address
    Fixed(VirtAddr),
    /// Let the allocator choose, aligned to `1 << align_log2` bytes
    Anywhere {
        /// Alignment exponent for the chosen address
        align_log2: u8,
    },
}

/// A request to back a virtual range with physical memory.
#[derive(Debug, Clone, Copy)]
pub struct MapRequest {
    /// Tag for logs and address-space bookkeeping
    pub tag: &'static str,
    /// Physical base address to map
    pub phys: PhysAddr,
    /// Size of the mapping in bytes
    pub size: usize,
    /// Virtual placement: caller-fixed or allocator-chosen
    pub slot: VirtSlot,
    /// Cacheability of the mapping
    pub cache: CachePolicy,
}

/// Why a mapping request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The requested virtual range is already in use
    AlreadyMapped,
    /// No virtual address space satisfies the request
    NoVirtualSpace,
    /// Page tables could not be allocated
    OutOfMemory,
    /// Malformed request (zero size, misaligned fixed address, ...)
    InvalidRequest,
}

/// Interface to the kernel virtual memory manager.
pub trait VirtualMemory {
    /// Establish a mapping and return the virtual address it landed at.
    ///
    /// For [`VirtSlot::Fixed`] requests the returned address equals the
    /// requested one.
    fn allocate_physical(&mut self, request: &MapRequest) -> Result<VirtAddr, MapError>;
}
