use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde_json::{Map, Value};
use tagson_reflect::Reflect;
use tagson_reflect::info::{ArrayInfo, MapInfo, TypeInfo};
use tagson_reflect::ops::{Map as MapOps, ReflectMut};

use super::ReadContext;
use crate::JsonError;
use crate::format::{describe, is_reserved_key};
use crate::shape::{ContainerShape, resolve_container};
use crate::write::is_string_like_key;

impl ReadContext<'_> {
    /// Reads an array into a list, set or array target.
    pub(super) fn read_collection(
        &mut self,
        value: &Value,
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, JsonError> {
        let shape = resolve_container(target);
        let Value::Array(items) = value else {
            return Err(JsonError::mismatch(target.type_path(), describe(value)));
        };

        let container = match shape.concrete {
            TypeInfo::Array(info) => self.read_array(value, info)?,
            TypeInfo::List(_) | TypeInfo::Set(_) => {
                let mut container = new_container(shape, items.len())?;
                self.fill_items(&mut *container, items)?;
                container
            }
            _ => {
                return Err(JsonError::Unsupported {
                    ty: target.type_path(),
                });
            }
        };

        shape.finish(container)
    }

    /// Pushes every item into an empty list, or inserts it into a set.
    pub(super) fn fill_items(&mut self, container: &mut dyn Reflect, items: &[Value]) -> Result<(), JsonError> {
        let target = container.reflect_type_info();
        match (target, container.reflect_mut()) {
            (TypeInfo::List(info), ReflectMut::List(list)) => {
                for item in items {
                    let item = self.read_value(item, info.item_info())?;
                    list.push(item).map_err(|item| {
                        JsonError::mismatch(info.item_info().type_path(), item.reflect_type_path())
                    })?;
                }
            }
            (TypeInfo::Set(info), ReflectMut::Set(set)) => {
                for item in items {
                    let item = self.read_value(item, info.item_info())?;
                    set.insert(item).map_err(|item| {
                        JsonError::mismatch(info.item_info().type_path(), item.reflect_type_path())
                    })?;
                }
            }
            _ => return Err(JsonError::mismatch(target.type_path(), "a list or set container")),
        }
        Ok(())
    }

    /// Reads nested arrays into a row-major array of `info.rank()` axes.
    fn read_array(&mut self, value: &Value, info: &'static ArrayInfo) -> Result<Box<dyn Reflect>, JsonError> {
        let mut dims = Vec::with_capacity(info.rank());
        let mut leaves = Vec::new();
        flatten(value, info, 0, &mut dims, &mut leaves)?;

        let elements = leaves
            .into_iter()
            .map(|leaf| self.read_value(leaf, info.item_info()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(info.from_elements(&dims, elements)?)
    }

    /// Reads a map from its plain object form or its `$kv` pair form.
    pub(super) fn read_map(
        &mut self,
        value: &Value,
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, JsonError> {
        let shape = resolve_container(target);
        if !matches!(shape.concrete, TypeInfo::Map(_)) {
            return Err(JsonError::Unsupported {
                ty: target.type_path(),
            });
        }
        let Value::Object(object) = value else {
            return Err(JsonError::mismatch(target.type_path(), describe(value)));
        };

        let mut container = new_container(shape, object.len())?;
        self.fill_map(&mut *container, object)?;
        shape.finish(container)
    }

    /// Inserts the entries of `object` into an empty map.
    pub(super) fn fill_map(
        &mut self,
        container: &mut dyn Reflect,
        object: &Map<String, Value>,
    ) -> Result<(), JsonError> {
        let target = container.reflect_type_info();
        let (TypeInfo::Map(info), ReflectMut::Map(map)) = (target, container.reflect_mut()) else {
            return Err(JsonError::mismatch(target.type_path(), "a map container"));
        };

        match object.get("$kv") {
            Some(pairs) => {
                for (key, value) in kv_pairs(pairs, info)? {
                    let key = self.read_value(key, info.key_info())?;
                    let value = self.read_value(value, info.value_info())?;
                    insert_entry(map, info, key, value)?;
                }
            }
            None => {
                if !is_string_like_key(info.key_info()) && !info.key_info().is_dynamic() {
                    return Err(JsonError::Unsupported {
                        ty: info.key_info().type_path(),
                    });
                }
                for (key, value) in object {
                    if is_reserved_key(key) {
                        continue;
                    }
                    let key = self.read_value(&Value::String(key.clone()), info.key_info())?;
                    let value = self.read_value(value, info.value_info())?;
                    insert_entry(map, info, key, value)?;
                }
            }
        }
        Ok(())
    }
}

fn insert_entry(
    map: &mut dyn MapOps,
    info: &'static MapInfo,
    key: Box<dyn Reflect>,
    value: Box<dyn Reflect>,
) -> Result<(), JsonError> {
    map.insert(key, value).map_err(|(key, value)| {
        JsonError::mismatch(
            info.type_path(),
            format!("a `{}` to `{}` entry", key.reflect_type_path(), value.reflect_type_path()),
        )
    })
}

fn new_container(shape: &ContainerShape, capacity: usize) -> Result<Box<dyn Reflect>, JsonError> {
    shape.with_capacity(capacity).ok_or(JsonError::Unsupported {
        ty: shape.concrete.type_path(),
    })
}

/// Collects the leaves of a nested array, recording the length of each axis.
///
/// Every sub-array on one axis must have the same length.
fn flatten<'v>(
    value: &'v Value,
    info: &'static ArrayInfo,
    axis: usize,
    dims: &mut Vec<usize>,
    leaves: &mut Vec<&'v Value>,
) -> Result<(), JsonError> {
    if axis == info.rank() {
        leaves.push(value);
        return Ok(());
    }
    let Value::Array(items) = value else {
        return Err(JsonError::mismatch(info.type_path(), describe(value)));
    };

    match dims.get(axis) {
        Some(&len) if len != items.len() => {
            return Err(JsonError::mismatch(
                info.type_path(),
                format!("a jagged array ({} elements where {len} expected on axis {axis})", items.len()),
            ));
        }
        Some(_) => {}
        None => dims.push(items.len()),
    }

    // Empty outer axes still fix the length of the inner ones.
    if items.is_empty() {
        while dims.len() < info.rank() {
            dims.push(0);
        }
    }
    for item in items {
        flatten(item, info, axis + 1, dims, leaves)?;
    }
    Ok(())
}

fn kv_pairs<'v>(pairs: &'v Value, info: &'static MapInfo) -> Result<Vec<(&'v Value, &'v Value)>, JsonError> {
    let Value::Array(pairs) = pairs else {
        return Err(JsonError::mismatch(info.type_path(), describe(pairs)));
    };
    pairs
        .iter()
        .map(|pair| match pair {
            Value::Object(pair) => Ok((entry(pair, "$k"), entry(pair, "$v"))),
            other => Err(JsonError::mismatch(info.type_path(), describe(other))),
        })
        .collect()
}

fn entry<'v>(pair: &'v Map<String, Value>, key: &str) -> &'v Value {
    pair.get(key).unwrap_or(&Value::Null)
}
