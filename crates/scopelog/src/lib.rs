#![doc = include_str!("../../../README.md")]
//!

//! This crate re-exports the core line logger and adds the `log_*!` macros.

pub use scopelog_core::*;

mod macros;
