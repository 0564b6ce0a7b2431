//! # tern-common
//!
//! Shared types and constants for the Tern kernel.
//!
//! This crate defines the vocabulary the rest of the system speaks:
//! - [`PhysAddr`](addr::PhysAddr) / [`VirtAddr`](addr::VirtAddr): typed
//!   physical and virtual addresses
//! - [`page`]: translation-granule constants and alignment helpers
//!
//! # no_std
//!
//! This crate is `#![no_std]` and has zero dependencies, making it suitable
//! as a foundation crate that all other Tern crates can depend on.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod addr;
pub mod page;

pub use addr::{PhysAddr, VirtAddr};
