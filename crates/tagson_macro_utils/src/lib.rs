//! Helpers shared by the workspace's proc-macro crates.
#![allow(clippy::std_instead_of_core, reason = "proc-macro helper crate")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro helper crate")]

extern crate proc_macro;

// -----------------------------------------------------------------------------
// Modules

mod manifest;

// -----------------------------------------------------------------------------
// Exports

pub use manifest::Manifest;
