use alloc::boxed::Box;
use core::fmt;

use crate::info::TypePath;
use crate::ops::{Array, ConstructError, Enum, List, Map, Nullable, ReflectRef};
use crate::ops::{Set, SharedHandle, Struct, Tuple};
use crate::{FromReflect, Reflect};

// -----------------------------------------------------------------------------
// Construction

/// Converts the constructor argument at `index` into a `T`.
///
/// Used by tuple, array and derived struct constructors.
pub fn take_arg<T: TypePath + FromReflect>(
    index: usize,
    value: Box<dyn Reflect>,
) -> Result<T, ConstructError> {
    T::take_from_reflect(value).map_err(|value| ConstructError::ArgumentType {
        index,
        expected: T::type_path(),
        found: value.reflect_type_path(),
    })
}

// -----------------------------------------------------------------------------
// Debug

/// Formats any reflected value by kind.
///
/// Opaque values without their own formatter print their type path.
pub fn reflect_debug(value: &dyn Reflect, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.reflect_ref() {
        ReflectRef::Struct(data) => struct_debug(data, f),
        ReflectRef::Tuple(data) => {
            let mut debug = f.debug_tuple("");
            for field in data.iter_fields() {
                debug.field(&field);
            }
            debug.finish()
        }
        ReflectRef::List(data) => f.debug_list().entries(data.iter()).finish(),
        ReflectRef::Array(data) => f.debug_list().entries(data.iter()).finish(),
        ReflectRef::Map(data) => f.debug_map().entries(data.iter()).finish(),
        ReflectRef::Set(data) => f.debug_set().entries(data.iter()).finish(),
        ReflectRef::Enum(data) => f.write_str(data.variant_name()),
        ReflectRef::Option(data) => match data.value() {
            Some(value) => f.debug_tuple("Some").field(&value).finish(),
            None => f.write_str("None"),
        },
        // Identity only: the value may be part of a cycle.
        ReflectRef::Shared(data) => write!(f, "Shared(#{:x})", data.identity()),
        ReflectRef::Opaque(_) => write!(f, "Opaque({})", value.reflect_type_path()),
    }
}

fn struct_debug(data: &dyn Struct, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_struct(data.reflect_type_info().type_name());
    for (name, value) in data.iter_fields() {
        debug.field(name, &value);
    }
    debug.finish()
}

// -----------------------------------------------------------------------------
// PartialEq

/// Compares two values by kind.
///
/// Returns `None` if a compared pair of opaque values does not support
/// comparison.
pub fn reflect_partial_eq(a: &dyn Reflect, b: &dyn Reflect) -> Option<bool> {
    match a.reflect_ref() {
        ReflectRef::Struct(data) => struct_partial_eq(data, b),
        ReflectRef::Tuple(data) => tuple_partial_eq(data, b),
        ReflectRef::List(data) => list_partial_eq(data, b),
        ReflectRef::Array(data) => array_partial_eq(data, b),
        ReflectRef::Map(data) => map_partial_eq(data, b),
        ReflectRef::Set(data) => set_partial_eq(data, b),
        ReflectRef::Enum(data) => enum_partial_eq(data, b),
        ReflectRef::Option(data) => option_partial_eq(data, b),
        ReflectRef::Shared(data) => shared_partial_eq(data, b),
        ReflectRef::Opaque(data) => data.reflect_partial_eq(b),
    }
}

pub fn struct_partial_eq(a: &dyn Struct, b: &dyn Reflect) -> Option<bool> {
    if a.ty_id() != b.ty_id() {
        return Some(false);
    }
    let ReflectRef::Struct(b) = b.reflect_ref() else {
        return Some(false);
    };
    for (index, field) in a.iter_fields().map(|(_, v)| v).enumerate() {
        match b.field_at(index) {
            Some(other) => {
                if !field.reflect_partial_eq(other)? {
                    return Some(false);
                }
            }
            None => return Some(false),
        }
    }
    Some(true)
}

pub fn tuple_partial_eq(a: &dyn Tuple, b: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Tuple(b) = b.reflect_ref() else {
        return Some(false);
    };
    if a.field_len() != b.field_len() {
        return Some(false);
    }
    for (x, y) in a.iter_fields().zip(b.iter_fields()) {
        if !x.reflect_partial_eq(y)? {
            return Some(false);
        }
    }
    Some(true)
}

pub fn list_partial_eq(a: &dyn List, b: &dyn Reflect) -> Option<bool> {
    let ReflectRef::List(b) = b.reflect_ref() else {
        return Some(false);
    };
    if a.len() != b.len() {
        return Some(false);
    }
    for (x, y) in a.iter().zip(b.iter()) {
        if !x.reflect_partial_eq(y)? {
            return Some(false);
        }
    }
    Some(true)
}

pub fn array_partial_eq(a: &dyn Array, b: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Array(b) = b.reflect_ref() else {
        return Some(false);
    };
    if a.len() != b.len() || a.rank() != b.rank() {
        return Some(false);
    }
    if (0..a.rank()).any(|axis| a.dim_len(axis) != b.dim_len(axis)) {
        return Some(false);
    }
    for (x, y) in a.iter().zip(b.iter()) {
        if !x.reflect_partial_eq(y)? {
            return Some(false);
        }
    }
    Some(true)
}

pub fn map_partial_eq(a: &dyn Map, b: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Map(b) = b.reflect_ref() else {
        return Some(false);
    };
    if a.len() != b.len() {
        return Some(false);
    }
    for (key, x) in a.iter() {
        match b.get(key) {
            Some(y) => {
                if !x.reflect_partial_eq(y)? {
                    return Some(false);
                }
            }
            None => return Some(false),
        }
    }
    Some(true)
}

pub fn set_partial_eq(a: &dyn Set, b: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Set(b) = b.reflect_ref() else {
        return Some(false);
    };
    Some(a.len() == b.len() && a.iter().all(|x| b.contains(x)))
}

pub fn enum_partial_eq(a: &dyn Enum, b: &dyn Reflect) -> Option<bool> {
    if a.ty_id() != b.ty_id() {
        return Some(false);
    }
    match b.reflect_ref() {
        ReflectRef::Enum(b) => Some(a.variant_index() == b.variant_index()),
        _ => Some(false),
    }
}

pub fn option_partial_eq(a: &dyn Nullable, b: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Option(b) = b.reflect_ref() else {
        return Some(false);
    };
    match (a.value(), b.value()) {
        (Some(x), Some(y)) => x.reflect_partial_eq(y),
        (None, None) => Some(true),
        _ => Some(false),
    }
}

/// Handles are equal if they share identity, or if their values are equal.
pub fn shared_partial_eq(a: &dyn SharedHandle, b: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Shared(b) = b.reflect_ref() else {
        return Some(false);
    };
    if a.identity() == b.identity() {
        return Some(true);
    }
    let x = a.read_value();
    let y = b.read_value();
    x.reflect_partial_eq(&**y)
}
