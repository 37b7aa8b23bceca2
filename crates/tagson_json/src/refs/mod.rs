//! Per-call registries for identities and global type ordinals.
//!
//! Nothing here outlives a single read or write call.

mod global_types;
mod reference_map;

pub use global_types::{GlobalTypeTable, GlobalTypeTableReader};
pub use reference_map::{ReferenceMap, ReferenceTable, VisitingStack};
