//! Compile-time type information.
//!
//! ## Menu
//!
//! - [`TypePath`]: stable type names, used for `$type` tags.
//! - [`Typed`]: static access to a type's [`TypeInfo`].
//! - [`TypeInfo`]: per-kind information, one variant per [`ReflectKind`]
//!   plus the declared-only `ReadOnly` and `Dynamic` variants.
//! - [`NamedField`]: a struct field or tuple element, with its wire options.
//!
//! Info structs hold function pointers that construct values of the described
//! type. The aliases below name their signatures.

use alloc::boxed::Box;

use crate::Reflect;
use crate::ops::ConstructError;

// -----------------------------------------------------------------------------
// Modules

mod array_info;
mod enum_info;
mod field_info;
mod list_info;
mod map_info;
mod opaque_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;
mod wrapper_info;

// -----------------------------------------------------------------------------
// Exports

pub use array_info::ArrayInfo;
pub use enum_info::{EnumInfo, VariantInfo};
pub use field_info::NamedField;
pub use list_info::{ListInfo, ListOrder};
pub use map_info::{MapInfo, SetInfo};
pub use opaque_info::OpaqueInfo;
pub use struct_info::{StructInfo, TupleInfo};
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use type_path::{Type, TypePath};
pub use typed::Typed;
pub use wrapper_info::{DynamicInfo, OptionInfo, ReadOnlyInfo, SharedInfo};

pub(crate) use type_path::impl_type_fn;

// -----------------------------------------------------------------------------
// Constructor signatures

/// Returns the [`TypeInfo`] of a field, element or target type.
///
/// Stored as a function because infos of recursive types refer to each other.
pub type InfoFn = fn() -> &'static TypeInfo;

/// Builds the default value of a type.
pub type DefaultFn = fn() -> Box<dyn Reflect>;

/// Builds an empty container with room for the given number of items.
pub type CapacityFn = fn(usize) -> Box<dyn Reflect>;

/// Moves a value into a wrapper (`Option`, `Shared`, read-only view).
///
/// Returns the value back if it is not of the wrapped type.
pub type WrapFn = fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>;

/// Builds a struct or tuple from its field values, in declaration order.
pub type ConstructFn = fn(alloc::vec::Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError>;

/// Builds an array from its dimensions and row-major elements.
pub type FromElementsFn =
    fn(&[usize], alloc::vec::Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError>;
