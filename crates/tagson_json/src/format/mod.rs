//! Text output and primitive formats.
//!
//! [`Output`] drives a `serde_json` formatter over an in-memory buffer.
//! The primitive codecs turn scalar values into JSON scalars and back,
//! converting between numeric widths, strings and dates where that is
//! lossless enough to be useful.

mod output;
mod primitive;
mod temporal;

pub use output::Output;
pub(crate) use primitive::{describe, read_primitive, write_primitive};
pub(crate) use temporal::{format_duration, parse_duration};

/// Object keys that carry codec metadata rather than content.
const RESERVED_KEYS: &[&str] = &["$type", "$id", "$ref", "$kv", "$types", "$value", "$values", "$dt"];

#[inline]
pub(crate) fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}
