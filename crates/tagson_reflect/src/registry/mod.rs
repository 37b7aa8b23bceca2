//! A registry of reflected types, searchable by type path and short name.
//!
//! ## Menu
//!
//! - [`TypeMeta`]: the registered record of one type.
//! - [`GetTypeMeta`]: builds a [`TypeMeta`] and registers the types it
//!   depends on, e.g. the field types of a struct.
//! - [`TypeRegistry`]: the registry itself.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, types derived with
//! `#[reflect(auto_register)]` or listed in
//! [`impl_auto_register!`](crate::derive::impl_auto_register) are collected
//! through [`inventory`] and added by [`TypeRegistry::auto_register`].
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod type_meta;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::{TypeRegistry, TypeRegistryArc};
