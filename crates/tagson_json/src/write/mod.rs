//! The write engine: a depth-first walk that emits tagged JSON text.
//!
//! [`WriteContext`] owns every piece of per-call state (output buffer,
//! reference ids, visiting stack, global type table, depth). Values are
//! dispatched on their [`TypeShape`](crate::shape::TypeShape) and kind to
//! the writers of this module.

// -----------------------------------------------------------------------------
// Modules

mod driver;
mod list_writer;
mod map_writer;
mod struct_writer;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use driver::write_root;
pub(crate) use map_writer::is_string_like_key;
