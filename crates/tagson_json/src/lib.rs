#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod read;
mod write;

pub mod format;
pub mod names;
pub mod refs;
pub mod settings;
pub mod shape;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::JsonError;
pub use names::{TypeNameResolver, default_registry};
pub use settings::{DeserializeSettings, SerializeSettings};
pub use shape::{default_dictionary_info, default_list_info};

use alloc::boxed::Box;
use alloc::string::String;

use serde_json::Value;
use tagson_reflect::info::{TypeInfo, Typed};
use tagson_reflect::{FromReflect, Reflect};

// -----------------------------------------------------------------------------
// Entry points

/// Writes a value as JSON text.
///
/// The static type of `T` is the expected type of the root: tags are only
/// written where the runtime type differs from it, subject to
/// [`SerializeSettings::type_tags`].
///
/// # Examples
///
/// ```
/// use tagson_json::{SerializeSettings, to_json_string};
///
/// let text = to_json_string(&vec![1_u8, 2, 3], &SerializeSettings::default()).unwrap();
/// assert_eq!(text, "\"AQID\"");
///
/// let text = to_json_string(&vec![1_u16, 2, 3], &SerializeSettings::default()).unwrap();
/// assert_eq!(text, "[1,2,3]");
/// ```
pub fn to_json_string<T: Reflect + Typed>(value: &T, settings: &SerializeSettings) -> Result<String, JsonError> {
    write::write_root(value, Some(T::type_info()), settings)
}

/// Writes a value whose static type is only known at runtime.
///
/// `expected` of `None` treats the root as an untyped slot.
pub fn to_json_string_dyn(
    value: &dyn Reflect,
    expected: Option<&'static TypeInfo>,
    settings: &SerializeSettings,
) -> Result<String, JsonError> {
    write::write_root(value, expected, settings)
}

/// Writes a value as JSON text into `writer`.
pub fn to_json_writer<T: Reflect + Typed, W: std::io::Write>(
    mut writer: W,
    value: &T,
    settings: &SerializeSettings,
) -> Result<(), JsonError> {
    let text = to_json_string(value, settings)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Reads a value of type `T` from JSON text.
///
/// # Examples
///
/// ```
/// use tagson_json::{DeserializeSettings, from_json_str};
///
/// let value: Vec<u32> = from_json_str("[1, 2, 3]", &DeserializeSettings::default()).unwrap();
/// assert_eq!(value, [1, 2, 3]);
///
/// let value: Option<i64> = from_json_str("null", &DeserializeSettings::default()).unwrap();
/// assert_eq!(value, None);
/// ```
pub fn from_json_str<T: FromReflect + Typed>(text: &str, settings: &DeserializeSettings) -> Result<T, JsonError> {
    let value: Value = serde_json::from_str(text)?;
    from_json_value(&value, settings)
}

/// Reads a value of type `T` from JSON text in `reader`.
pub fn from_json_reader<T: FromReflect + Typed, R: std::io::Read>(
    reader: R,
    settings: &DeserializeSettings,
) -> Result<T, JsonError> {
    let value: Value = serde_json::from_reader(reader)?;
    from_json_value(&value, settings)
}

/// Reads a value of type `T` from a parsed JSON tree.
pub fn from_json_value<T: FromReflect + Typed>(value: &Value, settings: &DeserializeSettings) -> Result<T, JsonError> {
    let value = read::read_root(value, T::type_info(), settings)?;
    T::take_from_reflect(value)
        .map_err(|value| JsonError::mismatch(T::type_info().type_path(), value.reflect_type_path()))
}

/// Reads a value of a type only known at runtime from JSON text.
pub fn from_json_str_dyn(
    text: &str,
    target: &'static TypeInfo,
    settings: &DeserializeSettings,
) -> Result<Box<dyn Reflect>, JsonError> {
    let value: Value = serde_json::from_str(text)?;
    from_json_value_dyn(&value, target, settings)
}

/// Reads a value of a type only known at runtime from a parsed JSON tree.
///
/// Passing the info of `Box<dyn Reflect>` reads an untyped document.
pub fn from_json_value_dyn(
    value: &Value,
    target: &'static TypeInfo,
    settings: &DeserializeSettings,
) -> Result<Box<dyn Reflect>, JsonError> {
    read::read_root(value, target, settings)
}
