use alloc::vec::Vec;

use tagson_reflect::Reflect;
use tagson_reflect::info::TypeInfo;
use tagson_reflect::ops::{Array, ReflectRef, Tuple};

use super::driver::{Header, WriteContext};
use crate::JsonError;

#[inline]
fn is_none(value: &dyn Reflect) -> bool {
    matches!(value.reflect_ref(), ReflectRef::Option(option) if option.is_none())
}

/// Writes list or set items as one array.
pub(super) fn write_items<'a>(
    cx: &mut WriteContext<'_>,
    header: Header,
    items: impl Iterator<Item = &'a dyn Reflect>,
    item_info: Option<&'static TypeInfo>,
) -> Result<(), JsonError> {
    let skip_null = cx.settings.ignore_null_list_items;
    cx.begin_collection(header)?;
    for item in items {
        if skip_null && is_none(item) {
            continue;
        }
        cx.out.element()?;
        cx.write_value(item, item_info)?;
    }
    cx.end_collection(header)
}

/// Writes an array, nesting one JSON array per axis.
pub(super) fn write_array(
    cx: &mut WriteContext<'_>,
    header: Header,
    array: &dyn Array,
    item_info: Option<&'static TypeInfo>,
) -> Result<(), JsonError> {
    let dims = (0..array.rank())
        .map(|axis| array.dim_len(axis))
        .collect::<Vec<_>>();
    let mut items = array.iter();

    cx.begin_collection(header)?;
    write_axis(cx, &mut items, &dims, item_info)?;
    cx.end_collection(header)
}

fn write_axis<'a>(
    cx: &mut WriteContext<'_>,
    items: &mut impl Iterator<Item = &'a dyn Reflect>,
    dims: &[usize],
    item_info: Option<&'static TypeInfo>,
) -> Result<(), JsonError> {
    let Some((&len, inner)) = dims.split_first() else {
        return Ok(());
    };
    for _ in 0..len {
        cx.out.element()?;
        if inner.is_empty() {
            let item = items
                .next()
                .ok_or_else(|| JsonError::mismatch("array item", "end of array"))?;
            cx.write_value(item, item_info)?;
        } else {
            cx.out.begin_array()?;
            write_axis(cx, items, inner, item_info)?;
            cx.out.end_array()?;
        }
    }
    Ok(())
}

/// Writes a tuple as a positional array.
pub(super) fn write_tuple(
    cx: &mut WriteContext<'_>,
    header: Header,
    tuple: &dyn Tuple,
) -> Result<(), JsonError> {
    let info = tuple.reflect_type_info().as_tuple();
    cx.begin_collection(header)?;
    for index in 0..tuple.field_len() {
        let Some(item) = tuple.field(index) else {
            continue;
        };
        let item_info = info
            .and_then(|info| info.field_at(index))
            .map(|field| field.type_info());
        cx.out.element()?;
        cx.write_value(item, item_info)?;
    }
    cx.end_collection(header)
}
