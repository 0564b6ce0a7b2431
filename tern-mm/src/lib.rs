//! Memory-Management Interfaces
//!
//! This crate defines the seams between platform bring-up and the memory
//! subsystems that come alive during boot:
//!
//! - [`PhysicalMemory`](arena::PhysicalMemory): the physical memory manager,
//!   which takes ownership of RAM [`Arena`](arena::Arena)s
//! - [`VirtualMemory`](vm::VirtualMemory): the kernel virtual memory manager,
//!   which satisfies physical mapping requests
//!
//! The implementations live elsewhere; bring-up code only ever sees these
//! traits, which also makes the whole boot path testable on the host with
//! recording doubles.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod arena;
pub mod vm;

pub use arena::{Arena, ArenaFlags, PhysicalMemory};
pub use vm::{CachePolicy, MapError, MapRequest, VirtSlot, VirtualMemory};
