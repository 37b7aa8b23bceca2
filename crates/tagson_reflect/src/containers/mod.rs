//! Container types with reflection support that have no std counterpart.
//!
//! - [`Shared<T>`]: a thread-safe shared handle whose identity survives a
//!   round-trip through `$id`/`$ref`.
//! - [`Stack<T>`]: a last-in first-out list.
//! - [`MultiArray<T, RANK>`]: a fixed-size, row-major, multi-dimensional array.

// -----------------------------------------------------------------------------
// Modules

mod multi_array;
mod shared;
mod stack;

// -----------------------------------------------------------------------------
// Exports

pub use multi_array::MultiArray;
pub use shared::{Shared, SharedRead, SharedWrite};
pub use stack::Stack;
