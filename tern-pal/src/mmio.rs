//! Device Window Mapping
//!
//! Mapping helpers for the bring-up stages: device register windows at the
//! virtual address the kernel expects them at, and the boot console wherever
//! the allocator likes as long as it is page-aligned. Both are uncached
//! device mappings.
//!
//! A refusal is logged at error severity and reported back, but never halts
//! boot by itself; the stages decide what a dead window means (by default:
//! keep going, so later diagnostics still have a console).

use tern_common::{PhysAddr, VirtAddr, page};
use tern_mm::{CachePolicy, MapError, MapRequest, VirtSlot, VirtualMemory};

use crate::config;

/// Map a device register window at a fixed virtual address.
pub fn map_device(
    vmm: &mut dyn VirtualMemory,
    name: &'static str,
    virt: VirtAddr,
    phys: PhysAddr,
    size: usize,
) -> Result<VirtAddr, MapError> {
    let request = MapRequest {
        tag: name,
        phys,
        size,
        slot: VirtSlot::Fixed(virt),
        cache: CachePolicy::Device,
    };
    match vmm.allocate_physical(&request) {
        Ok(addr) => Ok(addr),
        Err(err) => {
            log::error!("failed to map {} at {}: {:?}", name, virt, err);
            Err(err)
        }
    }
}

/// Map the boot console UART's register page.
///
/// The allocator picks the virtual address; the request only insists on page
/// alignment.
pub fn map_console(vmm: &mut dyn VirtualMemory) -> Result<VirtAddr, MapError> {
    let phys = PhysAddr::new(config::UART0_BASE).page_align_down();
    let request = MapRequest {
        tag: "uart",
        phys,
        size: page::SIZE,
        slot: VirtSlot::Anywhere {
            align_log2: page::SHIFT as u8,
        },
        cache: CachePolicy::Device,
    };
    match vmm.allocate_physical(&request) {
        Ok(addr) => Ok(addr),
        Err(err) => {
            log::error!("failed to map console uart: {:?}", err);
            Err(err)
        }
    }
}
