//! Secure Register Locator
//!
//! The interrupt controller's physical location is not fixed in this board's
//! address map; secure firmware owns that knowledge and reports it through a
//! synchronous secure monitor call. Firmware signals nothing in-band on
//! failure, so every returned address is validated here (non-zero, inside the
//! board's physical address space) before anything is mapped through it.
//!
//! The calling convention follows SMCCC: one function id per addressing
//! width, chosen at build time.

use tern_common::PhysAddr;

use crate::config;

// -- Function IDs

/// Get a register block base (SMC32 calling convention)
#[allow(dead_code)]
const SMC_FC_GET_REG_BASE: u32 = 0x8200_0007;

/// Get a register block base (SMC64 calling convention)
#[allow(dead_code)]
const SMC_FC64_GET_REG_BASE: u32 = 0xC200_0007;

cfg_if::cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        /// Function id matching the native addressing width
        pub const GET_REG_BASE: u32 = SMC_FC64_GET_REG_BASE;
    } else {
        /// Function id matching the native addressing width
        pub const GET_REG_BASE: u32 = SMC_FC_GET_REG_BASE;
    }
}

/// Hardware blocks firmware can be asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum RegisterBlock {
    /// GIC CPU interface
    GicCpuInterface = 0,
    /// GIC distributor
    GicDistributor = 1,
}

/// Why a reported register base was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateError {
    /// Firmware reported a null base
    NullBase(RegisterBlock),
    /// Firmware reported an address outside the physical address space
    OutOfRange {
        /// Block that was queried
        block: RegisterBlock,
        /// The rejected address
        addr: PhysAddr,
    },
}

/// Interface to the secure monitor.
///
/// The transport (the `smc` instruction and its register convention) lives
/// behind this trait; [`locate_register_base`] and the bring-up stages only
/// see the trait, which keeps them testable on the host.
pub trait SecureMonitor {
    /// Issue a synchronous fast call and return `x0` of the response.
    fn call(&self, function: u32, arg0: u64, arg1: u64, arg2: u64) -> u64;
}

/// Ask firmware where a hardware block lives.
///
/// Idempotent within one boot: firmware reports the same base for the same
/// block every time, and nothing is cached here; callers needing the value
/// twice hold their own copy.
pub fn locate_register_base(
    monitor: &dyn SecureMonitor,
    block: RegisterBlock,
) -> Result<PhysAddr, LocateError> {
    let raw = monitor.call(GET_REG_BASE, block as u64, 0, 0);
    let addr = PhysAddr::new(raw);

    if addr.is_null() {
        return Err(LocateError::NullBase(block));
    }
    if raw >= config::PHYS_ADDR_LIMIT {
        return Err(LocateError::OutOfRange { block, addr });
    }
    Ok(addr)
}

// -- Hardware conduit

/// The real secure monitor, reached through the `smc` instruction.
#[cfg(target_arch = "aarch64")]
pub struct SmcConduit;

#[cfg(target_arch = "aarch64")]
impl SecureMonitor for SmcConduit {
    fn call(&self, function: u32, arg0: u64, arg1: u64, arg2: u64) -> u64 {
        // SAFETY: A fast call with a valid function id traps to EL3 and
        // returns; firmware owns everything beyond that boundary.
        unsafe { smc_call(function, arg0, arg1, arg2) }
    }
}

/// Issue a secure monitor call.
///
/// Traps to EL3 where firmware services the request.
///
/// # Safety
/// This issues an SMC instruction.
#[cfg(target_arch = "aarch64")]
#[inline]
unsafe fn smc_call(function: u32, arg0: u64, arg1: u64, arg2: u64) -> u64 {
    let result: u64;
    unsafe {
        core::arch::asm!(
            "smc #0",
            inout("x0") function as u64 => result,
            inout("x1") arg0 => _,
            inout("x2") arg1 => _,
            inout("x3") arg2 => _,
            options(nomem, nostack)
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockMonitor;

    #[test]
    fn test_valid_base_is_accepted() {
        let monitor = MockMonitor::new(0x5004_2000, 0x5004_1000);
        let gicc = locate_register_base(&monitor, RegisterBlock::GicCpuInterface).unwrap();
        let gicd = locate_register_base(&monitor, RegisterBlock::GicDistributor).unwrap();
        assert_eq!(gicc, PhysAddr::new(0x5004_2000));
        assert_eq!(gicd, PhysAddr::new(0x5004_1000));
    }

    #[test]
    fn test_null_base_is_rejected() {
        let monitor = MockMonitor::new(0, 0x5004_1000);
        let err = locate_register_base(&monitor, RegisterBlock::GicCpuInterface).unwrap_err();
        assert_eq!(err, LocateError::NullBase(RegisterBlock::GicCpuInterface));
    }

    #[test]
    fn test_out_of_range_base_is_rejected() {
        let monitor = MockMonitor::new(config::PHYS_ADDR_LIMIT, 0x5004_1000);
        let err = locate_register_base(&monitor, RegisterBlock::GicCpuInterface).unwrap_err();
        assert!(matches!(err, LocateError::OutOfRange { .. }));
    }

    #[test]
    fn test_repeated_queries_return_identical_bases() {
        let monitor = MockMonitor::new(0x5004_2000, 0x5004_1000);
        let first = locate_register_base(&monitor, RegisterBlock::GicDistributor).unwrap();
        let second = locate_register_base(&monitor, RegisterBlock::GicDistributor).unwrap();
        assert_eq!(first, second);
        // No caching contract: each query reaches firmware again
        assert_eq!(monitor.calls(), 2);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_function_id_matches_addressing_width() {
        assert_eq!(GET_REG_BASE, SMC_FC64_GET_REG_BASE);
    }
}
