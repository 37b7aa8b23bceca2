use alloc::string::{String, ToString};
use alloc::vec::Vec;

use tagson_reflect::Reflect;
use tagson_reflect::info::TypeInfo;
use tagson_reflect::ops::{Map, ReflectRef};

use super::driver::{Header, WriteContext};
use crate::JsonError;
use crate::format::is_reserved_key;
use crate::shape::{PrimitiveKind, TypeShape, classify, resolve_container};

/// Key types written as plain object keys.
pub(crate) fn is_string_like_key(info: &'static TypeInfo) -> bool {
    use PrimitiveKind as K;

    match classify(info) {
        TypeShape::Enum => true,
        TypeShape::Primitive(kind) => matches!(kind, K::String | K::Char | K::Bool) || kind.is_integer() || kind.is_float(),
        _ => false,
    }
}

fn key_text(key: &dyn Reflect, use_enum_names: bool) -> Result<String, JsonError> {
    macro_rules! display {
        ($($ty:ty),*) => {
            $(
                if let Some(key) = key.downcast_ref::<$ty>() {
                    return Ok(key.to_string());
                }
            )*
        };
    }

    display!(String, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

    match key.reflect_ref() {
        ReflectRef::Enum(key) if use_enum_names => Ok(String::from(key.variant_name())),
        ReflectRef::Enum(key) => Ok(key.discriminant().to_string()),
        _ => Err(JsonError::mismatch("string-like map key", key.reflect_type_path())),
    }
}

/// Writes a map as an object, or as a `$kv` pair list when its keys are not
/// string-like or one of them would read back as a reserved key.
pub(super) struct MapWriter<'a> {
    pub value: &'a dyn Map,
    pub header: Header,
}

impl MapWriter<'_> {
    pub fn write(self, cx: &mut WriteContext<'_>) -> Result<(), JsonError> {
        let settings = cx.settings;
        let (key_info, value_info) = match resolve_container(self.value.reflect_type_info()).concrete {
            TypeInfo::Map(info) => (Some(info.key_info()), Some(info.value_info())),
            _ => (None, None),
        };
        let plain = !settings.use_kv_model_for_maps && key_info.is_some_and(is_string_like_key);

        let entries = if plain {
            let entries = self
                .value
                .iter()
                .map(|(key, value)| {
                    let mut text = key_text(key, settings.use_enum_names)?;
                    if !settings.case_sensitive {
                        text.make_ascii_lowercase();
                    }
                    Ok((text, value))
                })
                .collect::<Result<Vec<_>, JsonError>>()?;
            Some(entries).filter(|entries| !entries.iter().any(|(key, _)| is_reserved_key(key)))
        } else {
            None
        };

        cx.out.begin_object()?;
        cx.write_header(self.header)?;

        if let Some(mut entries) = entries {
            if settings.order_keys {
                entries.sort_by(|a, b| a.0.cmp(&b.0));
            }
            for (key, value) in entries {
                cx.out.key(&key)?;
                cx.write_value(value, value_info)?;
            }
        } else {
            cx.out.key("$kv")?;
            cx.out.begin_array()?;
            for (key, value) in self.value.iter() {
                cx.out.element()?;
                cx.out.begin_object()?;
                cx.out.key("$k")?;
                cx.write_value(key, key_info)?;
                cx.out.key("$v")?;
                cx.write_value(value, value_info)?;
                cx.out.end_object()?;
            }
            cx.out.end_array()?;
        }

        cx.out.end_object()
    }
}
