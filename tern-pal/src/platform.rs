//! Board Platform Entry Points
//!
//! Ties the bring-up pieces to the board: the initial mapping table the
//! architecture bootstrap consumes, the default RAM arena, the pre-VM debug
//! port selection, and (on the real target) the wiring of the sequencer over
//! the hardware drivers.

use tern_mm::{Arena, ArenaFlags, PhysicalMemory};
use tern_common::{PhysAddr, VirtAddr};

use crate::bringup::BringupConfig;
use crate::config;
use crate::memmap::{MappingEntry, MappingFlags};
use crate::ram::{self, RamSource};

/// The board's initial mapping table.
///
/// The architecture bootstrap builds its first page tables from this before
/// the MMU is enabled, and the reset path may patch the dynamic RAM entry
/// with the window the hardware actually has before the resolver re-scans
/// the table. Always sentinel-terminated.
#[must_use]
pub const fn board_mappings() -> [MappingEntry; 3] {
    [
        // Dynamic: base and size may be overwritten at reset with the
        // detected RAM configuration
        MappingEntry {
            phys: PhysAddr::new(config::RAM_BASE + config::KERNEL_LOAD_OFFSET),
            virt: VirtAddr::new(config::KERNEL_BASE + config::KERNEL_LOAD_OFFSET),
            size: config::RAM_SIZE_DEFAULT,
            flags: MappingFlags::DYNAMIC,
            name: config::RAM_ARENA_NAME,
        },
        // Boot console registers
        MappingEntry {
            phys: PhysAddr::new(config::UART0_BASE),
            virt: VirtAddr::new(config::UART0_VIRT),
            size: config::UART0_SIZE,
            flags: MappingFlags::DEVICE,
            name: "uart",
        },
        MappingEntry::SENTINEL,
    ]
}

/// Compile-time default RAM arena.
///
/// The resolver overrides base and size when the mapping table carries a
/// patched dynamic entry.
#[must_use]
pub const fn default_ram_arena() -> Arena {
    Arena::new(
        config::RAM_ARENA_NAME,
        PhysAddr::new(config::RAM_BASE + config::KERNEL_LOAD_OFFSET),
        config::RAM_SIZE_DEFAULT,
        ArenaFlags::KERNEL_MAP,
    )
}

/// Pre-VM platform init: select the debug port so early prints have
/// somewhere to go. The UART driver consumes the selection.
pub fn early_init(cfg: &BringupConfig) {
    log::trace!("debug uart {}", cfg.debug_uart);
}

/// Reconcile the RAM window with `table` and hand it to the physical memory
/// manager. Runs once, between the architecture bootstrap and VM init.
pub fn init_memory(pmm: &mut dyn PhysicalMemory, table: &[MappingEntry]) -> RamSource {
    ram::resolve_and_register_ram(table, default_ram_arena(), pmm)
}

#[cfg(target_arch = "aarch64")]
mod board {
    use spin::Mutex;
    use tern_mm::VirtualMemory;

    use crate::bringup::{BootContext, BringupConfig, BringupSequencer, InitLevel};
    use crate::gic::GicDriver;
    use crate::smc::SmcConduit;
    use crate::timer::GenericTimer;

    static GIC: Mutex<GicDriver> = Mutex::new(GicDriver::new());
    static TIMER: Mutex<GenericTimer> = Mutex::new(GenericTimer::new());
    static SEQUENCER: Mutex<BringupSequencer> = Mutex::new(BringupSequencer::new());

    /// Drive the bring-up stages as kernel init raises the readiness level.
    ///
    /// Safe to call at every level transition; each stage fires exactly
    /// once. A terminal failure is reported here and the sequencer stays
    /// where it stopped; there is no recovery path this early.
    pub fn vm_level_changed(vmm: &mut dyn VirtualMemory, level: InitLevel) {
        let monitor = SmcConduit;
        let mut gic = GIC.lock();
        let mut timer = TIMER.lock();
        let mut ctx = BootContext {
            vmm,
            monitor: &monitor,
            intc: &mut *gic,
            timer: &mut *timer,
            config: BringupConfig::new(),
        };
        if let Err(err) = SEQUENCER.lock().advance(&mut ctx, level) {
            log::error!("platform bring-up failed: {:?}", err);
        }
    }
}

#[cfg(target_arch = "aarch64")]
pub use board::vm_level_changed;
