#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Derive output names this crate through `::tagson_reflect`, which must also
// resolve inside the crate itself.
extern crate self as tagson_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod containers;
pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use containers::{MultiArray, Shared, Stack};
pub use reflection::{FromReflect, Reflect};
pub use tagson_reflect_derive as derive;
pub use tagson_reflect_derive::Reflect;
