//! Staged Bring-up Sequencer
//!
//! Device bring-up cannot run until the virtual memory subsystem can satisfy
//! mapping requests, and it has internal ordering of its own: the console
//! window must exist before anything that might want to complain does, and
//! the interrupt controller's location must be known before its driver is
//! touched. Both constraints are expressed here as an explicit two-stage
//! state machine gated on [`InitLevel`]:
//!
//! - [`STAGE_CONSOLE_MAP`] (VM + 1): map the console UART
//! - [`STAGE_DEVICE_INIT`] (VM + 2): locate and map the GIC windows, then
//!   initialise the interrupt controller and system timer
//!
//! Each stage is held in an `Option` slot and consumed by value when it
//! runs, so "exactly once" and "A before B" are properties of the types, not
//! of caller discipline. Everything a stage touches is threaded through a
//! [`BootContext`]; nothing here is a file-scoped global.
//!
//! The whole sequence runs single-threaded on the boot CPU before any
//! scheduler exists, so no locking happens at this layer.

use tern_common::{PhysAddr, VirtAddr};
use tern_mm::{MapError, VirtualMemory};

use crate::config;
use crate::gic::InterruptController;
use crate::mmio;
use crate::smc::{self, LocateError, RegisterBlock, SecureMonitor};
use crate::timer::SystemTimer;

/// Monotonically increasing boot milestone ordinal.
///
/// The kernel's init machinery raises the level as subsystems come up and
/// re-invokes [`BringupSequencer::advance`] at each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct InitLevel(pub u16);

impl InitLevel {
    /// Virtual memory subsystem operational
    pub const VM: InitLevel = InitLevel(0x50);

    /// The level `n` steps after this one.
    #[must_use]
    pub const fn plus(self, n: u16) -> Self {
        InitLevel(self.0 + n)
    }
}

/// A bring-up hook registration: a name and the level it runs at.
#[derive(Debug, Clone, Copy)]
pub struct StageInfo {
    /// Hook name, for diagnostics
    pub name: &'static str,
    /// Level the hook fires at
    pub level: InitLevel,
}

/// Stage A: map the console UART so later stages can emit diagnostics.
pub const STAGE_CONSOLE_MAP: StageInfo = StageInfo {
    name: "platform-console-map",
    level: InitLevel::VM.plus(1),
};

/// Stage B: locate and map the interrupt controller, bring up GIC and timer.
pub const STAGE_DEVICE_INIT: StageInfo = StageInfo {
    name: "platform-device-init",
    level: InitLevel::VM.plus(2),
};

/// Boot-time policy knobs.
#[derive(Debug, Clone, Copy)]
pub struct BringupConfig {
    /// Halt on a refused device mapping instead of logging and continuing.
    ///
    /// Off by default: a dead window costs register access later, but
    /// pressing on keeps the console alive for diagnostics.
    pub strict: bool,
    /// Debug UART selected before the VM stages run
    pub debug_uart: u32,
}

impl BringupConfig {
    /// The default policy: continue on failure, first debug UART.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strict: false,
            debug_uart: config::DEFAULT_DEBUG_UART,
        }
    }
}

impl Default for BringupConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the stages touch, threaded explicitly through the sequence.
pub struct BootContext<'a> {
    /// Kernel virtual memory manager
    pub vmm: &'a mut dyn VirtualMemory,
    /// Secure monitor transport
    pub monitor: &'a dyn SecureMonitor,
    /// Interrupt controller driver
    pub intc: &'a mut dyn InterruptController,
    /// System timer driver
    pub timer: &'a mut dyn SystemTimer,
    /// Boot policy
    pub config: BringupConfig,
}

/// Terminal bring-up failures.
///
/// There is no recovery path this early; the platform entry logs the error
/// and stops. Mapping refusals only appear here in strict mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringupError {
    /// Firmware reported an unusable register base
    InvalidRegisterBase(LocateError),
    /// A device mapping was refused (strict mode only)
    MapFailed {
        /// Window that failed
        name: &'static str,
        /// The manager's refusal
        err: MapError,
    },
}

struct ConsoleMapStage;
struct DeviceInitStage;

impl ConsoleMapStage {
    fn run(self, ctx: &mut BootContext<'_>) -> Result<(), BringupError> {
        if let Err(err) = mmio::map_console(ctx.vmm) {
            // Already logged; without a console window later diagnostics go
            // nowhere, but that is still better than stopping here.
            if ctx.config.strict {
                return Err(BringupError::MapFailed { name: "uart", err });
            }
        }
        Ok(())
    }
}

impl DeviceInitStage {
    fn run(self, ctx: &mut BootContext<'_>) -> Result<(), BringupError> {
        // Firmware owns the interrupt controller's location; ask, and refuse
        // to touch anything if the answer is unusable.
        let gicc = smc::locate_register_base(ctx.monitor, RegisterBlock::GicCpuInterface)
            .map_err(BringupError::InvalidRegisterBase)?;
        let gicd = smc::locate_register_base(ctx.monitor, RegisterBlock::GicDistributor)
            .map_err(BringupError::InvalidRegisterBase)?;

        log::info!("gicc {}, gicd {}", gicc, gicd);

        map_device_checked(
            ctx,
            "gicc",
            VirtAddr::new(config::GICC_VIRT),
            gicc,
            config::GICC_SIZE,
        )?;
        map_device_checked(
            ctx,
            "gicd",
            VirtAddr::new(config::GICD_VIRT),
            gicd,
            config::GICD_SIZE,
        )?;

        ctx.intc.init();
        ctx.timer.init(config::TIMER_IRQ);
        Ok(())
    }
}

/// Map a device window; a refusal only propagates in strict mode.
fn map_device_checked(
    ctx: &mut BootContext<'_>,
    name: &'static str,
    virt: VirtAddr,
    phys: PhysAddr,
    size: usize,
) -> Result<(), BringupError> {
    match mmio::map_device(ctx.vmm, name, virt, phys, size) {
        Ok(_) => Ok(()),
        Err(err) if ctx.config.strict => Err(BringupError::MapFailed { name, err }),
        // Already logged; register access through the window may fault later
        Err(_) => Ok(()),
    }
}

/// The two-stage bring-up state machine.
pub struct BringupSequencer {
    console_map: Option<ConsoleMapStage>,
    device_init: Option<DeviceInitStage>,
}

impl BringupSequencer {
    /// Both stages pending.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            console_map: Some(ConsoleMapStage),
            device_init: Some(DeviceInitStage),
        }
    }

    /// Run every pending stage whose level has been reached, in ascending
    /// level order.
    ///
    /// Safe to call at every level transition; a stage that has run (or
    /// terminally failed) never runs again. A strict-mode or locator failure
    /// propagates out and the boot is considered stopped.
    pub fn advance(
        &mut self,
        ctx: &mut BootContext<'_>,
        level: InitLevel,
    ) -> Result<(), BringupError> {
        if level >= STAGE_CONSOLE_MAP.level {
            if let Some(stage) = self.console_map.take() {
                log::trace!("bring-up stage {}", STAGE_CONSOLE_MAP.name);
                stage.run(ctx)?;
            }
        }
        if level >= STAGE_DEVICE_INIT.level && self.console_map.is_none() {
            if let Some(stage) = self.device_init.take() {
                log::trace!("bring-up stage {}", STAGE_DEVICE_INIT.name);
                stage.run(ctx)?;
            }
        }
        Ok(())
    }

    /// True once both stages have been consumed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.console_map.is_none() && self.device_init.is_none()
    }
}

impl Default for BringupSequencer {
    fn default() -> Self {
        Self::new()
    }
}
