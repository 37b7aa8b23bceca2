//! Data-access interfaces for reflected values.
//!
//! ## Menu
//!
//! Each [`ReflectKind`](crate::info::ReflectKind) has a subtrait of
//! [`Reflect`](crate::Reflect), reached through [`ReflectRef`] and [`ReflectMut`]:
//!
//! - [`Struct`]: named fields, e.g. `Node { .. }`.
//! - [`Tuple`]: positional fields, e.g. `(i32, String)`.
//! - [`List`]: growable sequences, e.g. `Vec<T>`, `VecDeque<T>`.
//! - [`Array`]: fixed-size, possibly multi-dimensional, e.g. `[T; N]`.
//! - [`Map`]: keyed maps, e.g. `HashMap<K, V>`.
//! - [`Set`]: unordered bags, e.g. `HashSet<T>`.
//! - [`Enum`]: field-less enums.
//! - [`Nullable`]: `Option<T>`.
//! - [`SharedHandle`]: identity-bearing handles, [`Shared<T>`](crate::Shared).

// -----------------------------------------------------------------------------
// Modules

mod array_ops;
mod construct_error;
mod enum_ops;
mod kind;
mod list_ops;
mod map_ops;
mod option_ops;
mod set_ops;
mod shared_ops;
mod struct_ops;
mod tuple_ops;

// -----------------------------------------------------------------------------
// Exports

pub use construct_error::ConstructError;
pub use kind::{ReflectMut, ReflectRef};

pub use array_ops::{Array, ArrayItemIter};
pub use enum_ops::Enum;
pub use list_ops::{List, ListItemIter};
pub use map_ops::Map;
pub use option_ops::Nullable;
pub use set_ops::Set;
pub use shared_ops::{SharedHandle, SharedReadGuard, SharedWriteGuard};
pub use struct_ops::{Struct, StructFieldIter};
pub use tuple_ops::{Tuple, TupleFieldIter};
