//! Process-wide metadata caches.
//!
//! - [`classify`]: the [`TypeShape`] of a type, which drives how the engines
//!   treat its values.
//! - [`members_of`]: the ordered, keyed [`MemberTable`] of a struct.
//! - [`resolve_container`]: the concrete backing type a collection target is
//!   built as.
//!
//! Every cache is append-only and keyed by `TypeId`. Entries are computed
//! outside the lock, so two threads may both compute one; the first insert
//! wins and is handed out as `&'static`.

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod classify;
mod container;
mod members;

// -----------------------------------------------------------------------------
// Exports

pub use classify::{PrimitiveKind, SpecialContainer, TypeShape, classify};
pub use container::{ContainerShape, resolve_container};
pub use members::{MemberDescriptor, MemberTable, members_of};

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use indexmap::IndexMap;
use tagson_reflect::Reflect;
use tagson_reflect::info::{TypeInfo, Typed};

/// The type an untyped JSON object is read into.
pub type DefaultDictionary = IndexMap<String, Box<dyn Reflect>>;

/// The type an untyped JSON array is read into.
pub type DefaultList = Vec<Box<dyn Reflect>>;

#[inline]
pub fn default_dictionary_info() -> &'static TypeInfo {
    DefaultDictionary::type_info()
}

#[inline]
pub fn default_list_info() -> &'static TypeInfo {
    DefaultList::type_info()
}
