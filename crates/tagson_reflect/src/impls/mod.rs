//! Built-in reflection impls and helpers for writing new ones.
//!
//! - [`concat`]: string concatenation for generic type paths.
//! - [`NonGenericTypeInfoCell`], [`GenericTypeInfoCell`] and
//!   [`GenericTypePathCell`]: static storage for [`Typed`] and [`TypePath`].
//! - [`reflect_debug`] and the `*_partial_eq` helpers: kind-generic
//!   implementations of [`Reflect::reflect_debug`] and
//!   [`Reflect::reflect_partial_eq`].
//!
//! ## Implemented Menu
//!
//! - scalars: `bool`, `char`, `u8`-`u128`, `usize`, `i8`-`i128`, `isize`,
//!   `f32`, `f64`, `String`, `Duration`
//! - `chrono` feature: `DateTime<Utc>`, `NaiveDate`, `NaiveDateTime`, `NaiveTime`
//! - `uuid` feature: `Uuid`
//! - `Option<T>`
//! - lists: `Vec<T>`, `VecDeque<T>`, [`Stack<T>`](crate::Stack)
//! - arrays: `[T; N]`, `Box<[T]>`, `Arc<[T]>` (read-only),
//!   [`MultiArray<T, R>`](crate::MultiArray)
//! - maps: `HashMap<K, V>`, `BTreeMap<K, V>`, `IndexMap<K, V>`, and read-only
//!   `Arc<HashMap<K, V>>`, `Arc<BTreeMap<K, V>>`
//! - sets: `HashSet<T>`, `BTreeSet<T>`
//! - tuples of one to eight elements
//! - [`Shared<T>`](crate::Shared)
//! - `Box<dyn Reflect>`
//!
//! [`Typed`]: crate::info::Typed
//! [`TypePath`]: crate::info::TypePath
//! [`Reflect::reflect_debug`]: crate::Reflect::reflect_debug
//! [`Reflect::reflect_partial_eq`]: crate::Reflect::reflect_partial_eq

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod helpers;

mod array;
mod dynamic;
mod list;
mod map;
mod opaque;
mod option;
mod set;
mod shared;
mod tuple;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};
pub use helpers::*;

/// An efficient string concatenation function.
///
/// Usually used to implement `TypePath` for generic types.
///
/// ```
/// use tagson_reflect::impls;
///
/// let s = impls::concat(&["alloc::vec::Vec", "<", "u8", ">"]);
/// assert_eq!(s, "alloc::vec::Vec<u8>");
/// assert_eq!(s.capacity(), 19);
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> alloc::string::String {
    let mut len = 0usize;
    for &item in arr {
        len += item.len();
    }
    let mut res = alloc::string::String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}

/// Returns the last segment of a non-generic type path.
///
/// ```
/// assert_eq!(tagson_reflect::impls::short_name("a::b::Node"), "Node");
/// assert_eq!(tagson_reflect::impls::short_name("u8"), "u8");
/// ```
#[inline]
pub fn short_name(path: &'static str) -> &'static str {
    match path.rfind("::") {
        Some(index) => &path[index + 2..],
        None => path,
    }
}
