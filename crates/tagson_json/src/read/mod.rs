//! The read engine: rebuilds typed values from a parsed JSON tree.
//!
//! The requested [`TypeInfo`](tagson_reflect::info::TypeInfo) drives the
//! walk. `$type` tags, `$ref` tokens and boxed `$value`/`$values`
//! payloads are resolved first; the target's kind then selects one of the
//! readers of this module.

// -----------------------------------------------------------------------------
// Modules

mod collection_reader;
mod driver;
mod dynamic_reader;
mod struct_reader;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use driver::{ReadContext, read_root};
