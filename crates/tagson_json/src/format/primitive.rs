use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::Any;
use core::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use tagson_reflect::Reflect;
use tagson_reflect::info::TypeInfo;
use tagson_reflect::ops::ReflectRef;

use super::{Output, format_duration, parse_duration};
use crate::JsonError;
use crate::shape::PrimitiveKind;

/// Names a JSON value in error messages.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => String::from("an array"),
        Value::Object(_) => String::from("an object"),
    }
}

// -----------------------------------------------------------------------------
// Writing

fn cast<'a, T: Any>(value: &'a dyn Reflect, expected: &'static str) -> Result<&'a T, JsonError> {
    value
        .downcast_ref::<T>()
        .ok_or_else(|| JsonError::mismatch(expected, value.reflect_type_path()))
}

/// Borrows the bytes of `Vec<u8>`, or collects them from any list or array of `u8`.
fn bytes_of(value: &dyn Reflect) -> Result<Cow<'_, [u8]>, JsonError> {
    if let Some(bytes) = value.downcast_ref::<Vec<u8>>() {
        return Ok(Cow::Borrowed(bytes));
    }
    fn collect<'a>(items: impl Iterator<Item = &'a dyn Reflect>) -> Option<Vec<u8>> {
        items.map(|item| item.downcast_ref::<u8>().copied()).collect()
    }

    let bytes = match value.reflect_ref() {
        ReflectRef::List(list) => collect(list.iter()),
        ReflectRef::Array(array) => collect(array.iter()),
        _ => None,
    };
    bytes
        .map(Cow::Owned)
        .ok_or_else(|| JsonError::mismatch("bytes", value.reflect_type_path()))
}

/// Writes a scalar of the given kind inline.
pub(crate) fn write_primitive(
    out: &mut Output,
    kind: PrimitiveKind,
    value: &dyn Reflect,
) -> Result<(), JsonError> {
    use PrimitiveKind as K;

    macro_rules! get {
        ($ty:ty) => {
            *cast::<$ty>(value, stringify!($ty))?
        };
    }

    match kind {
        K::Bool => out.bool(get!(bool)),
        K::Char => out.str(get!(char).encode_utf8(&mut [0; 4])),
        K::String => out.str(cast::<String>(value, "String")?),
        K::I8 => out.i64(get!(i8).into()),
        K::I16 => out.i64(get!(i16).into()),
        K::I32 => out.i64(get!(i32).into()),
        K::I64 => out.i64(get!(i64)),
        K::Isize => out.i64(get!(isize) as i64),
        K::U8 => out.u64(get!(u8).into()),
        K::U16 => out.u64(get!(u16).into()),
        K::U32 => out.u64(get!(u32).into()),
        K::U64 => out.u64(get!(u64)),
        K::Usize => out.u64(get!(usize) as u64),
        // Outside the 64-bit range the parser would lose precision.
        K::I128 => {
            let n = get!(i128);
            match i64::try_from(n) {
                Ok(n) => out.i64(n),
                Err(_) => out.str(&n.to_string()),
            }
        }
        K::U128 => {
            let n = get!(u128);
            match u64::try_from(n) {
                Ok(n) => out.u64(n),
                Err(_) => out.str(&n.to_string()),
            }
        }
        K::F32 => out.f32(get!(f32)),
        K::F64 => out.f64(get!(f64)),
        K::Duration => out.str(&format_duration(get!(Duration))),
        K::Bytes => out.str(&STANDARD.encode(bytes_of(value)?)),
        #[cfg(feature = "chrono")]
        K::DateTime => out.str(&super::temporal::dates::format_date_time(cast(value, "DateTime<Utc>")?)),
        #[cfg(feature = "chrono")]
        K::NaiveDateTime => out.str(&super::temporal::dates::format_naive_date_time(cast(
            value,
            "NaiveDateTime",
        )?)),
        #[cfg(feature = "chrono")]
        K::Date => out.str(&cast::<chrono::NaiveDate>(value, "NaiveDate")?.to_string()),
        #[cfg(feature = "chrono")]
        K::Time => out.str(&cast::<chrono::NaiveTime>(value, "NaiveTime")?.to_string()),
        #[cfg(feature = "uuid")]
        K::Uuid => out.str(&cast::<uuid::Uuid>(value, "Uuid")?.hyphenated().to_string()),
        #[allow(unreachable_patterns, reason = "reachable without optional features")]
        _ => Err(JsonError::Unsupported {
            ty: value.reflect_type_path(),
        }),
    }
}

// -----------------------------------------------------------------------------
// Reading

fn to_i128(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i128>().ok().or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

fn to_u128(value: &Value) -> Option<u128> {
    match value {
        Value::String(s) => s.trim().parse::<u128>().ok(),
        _ => to_i128(value).and_then(|n| u128::try_from(n).ok()),
    }
}

fn integral(f: f64) -> Option<i128> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 1.7e38).then_some(f as i128)
}

fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn to_char(value: &Value) -> Option<char> {
    match value {
        Value::String(s) => {
            let mut chars = s.chars();
            chars.next().filter(|_| chars.next().is_none())
        }
        Value::Number(n) => n.as_u64().and_then(|n| char::from_u32(u32::try_from(n).ok()?)),
        _ => None,
    }
}

fn to_bytes(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::String(s) => STANDARD.decode(s).ok(),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
            .collect(),
        _ => None,
    }
}

fn to_duration(value: &Value) -> Option<Duration> {
    match value {
        Value::Number(n) => Duration::try_from_secs_f64(n.as_f64()?).ok(),
        Value::String(s) => parse_duration(s.trim()).or_else(|| Duration::try_from_secs_f64(s.parse().ok()?).ok()),
        _ => None,
    }
}

#[cfg(feature = "chrono")]
fn to_text(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim)
}

/// Converts a JSON scalar into a value of the given kind.
///
/// Numbers convert between widths when the value fits, and numbers,
/// booleans and strings convert into each other where the text allows it.
pub(crate) fn read_primitive(
    kind: PrimitiveKind,
    info: &'static TypeInfo,
    value: &Value,
) -> Result<Box<dyn Reflect>, JsonError> {
    use PrimitiveKind as K;

    macro_rules! int {
        ($ty:ty) => {
            to_i128(value)
                .and_then(|n| <$ty>::try_from(n).ok())
                .map(|n| Box::new(n) as Box<dyn Reflect>)
        };
    }

    fn boxed<T: Reflect>(value: T) -> Box<dyn Reflect> {
        Box::new(value)
    }

    let result = match kind {
        K::Bool => to_bool(value).map(boxed),
        K::Char => to_char(value).map(boxed),
        K::String => to_string(value).map(boxed),
        K::I8 => int!(i8),
        K::I16 => int!(i16),
        K::I32 => int!(i32),
        K::I64 => int!(i64),
        K::I128 => to_i128(value).map(boxed),
        K::Isize => int!(isize),
        K::U8 => int!(u8),
        K::U16 => int!(u16),
        K::U32 => int!(u32),
        K::U64 => int!(u64),
        K::U128 => to_u128(value).map(boxed),
        K::Usize => int!(usize),
        K::F32 => to_f64(value).map(|f| boxed(f as f32)),
        K::F64 => to_f64(value).map(boxed),
        K::Duration => to_duration(value).map(boxed),
        K::Bytes => to_bytes(value).map(boxed),
        #[cfg(feature = "chrono")]
        K::DateTime => match value {
            Value::Number(n) => n
                .as_i64()
                .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
                .map(boxed),
            _ => to_text(value)
                .and_then(super::temporal::dates::parse_date_time)
                .map(boxed),
        },
        #[cfg(feature = "chrono")]
        K::NaiveDateTime => to_text(value)
            .and_then(super::temporal::dates::parse_naive_date_time)
            .map(boxed),
        #[cfg(feature = "chrono")]
        K::Date => to_text(value).and_then(super::temporal::dates::parse_date).map(boxed),
        #[cfg(feature = "chrono")]
        K::Time => to_text(value).and_then(super::temporal::dates::parse_time).map(boxed),
        #[cfg(feature = "uuid")]
        K::Uuid => value
            .as_str()
            .and_then(|s| uuid::Uuid::parse_str(s.trim()).ok())
            .map(boxed),
        #[allow(unreachable_patterns, reason = "reachable without optional features")]
        _ => return Err(JsonError::Unsupported { ty: info.type_path() }),
    };

    result.ok_or_else(|| JsonError::mismatch(info.type_path(), describe(value)))
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::time::Duration;

    use serde_json::{Value, json};
    use tagson_reflect::Reflect;
    use tagson_reflect::info::Typed;

    use super::{read_primitive, write_primitive};
    use crate::JsonError;
    use crate::format::Output;
    use crate::settings::Formatting;
    use crate::shape::PrimitiveKind as K;

    fn write(kind: K, value: &dyn Reflect) -> String {
        let mut out = Output::new(Formatting::None);
        write_primitive(&mut out, kind, value).unwrap();
        out.into_string()
    }

    fn read<T: Typed + Reflect + Clone>(kind: K, value: Value) -> Result<T, JsonError> {
        let boxed: Box<dyn Reflect> = read_primitive(kind, T::type_info(), &value)?;
        Ok(boxed.downcast_ref::<T>().unwrap().clone())
    }

    #[test]
    fn writes_scalars() {
        assert_eq!(write(K::I32, &-4_i32), "-4");
        assert_eq!(write(K::Char, &'x'), "\"x\"");
        assert_eq!(write(K::U128, &u128::MAX), format!("\"{}\"", u128::MAX));
        assert_eq!(write(K::I128, &5_i128), "5");
        assert_eq!(write(K::Duration, &Duration::from_millis(1500)), "\"PT1.5S\"");
        assert_eq!(write(K::Bytes, &vec![1_u8, 2, 3]), "\"AQID\"");
        assert_eq!(write(K::Bytes, &[1_u8, 2, 3]), "\"AQID\"");
    }

    #[test]
    fn numeric_conversions() {
        assert_eq!(read::<u8>(K::U8, json!(200)).unwrap(), 200);
        assert_eq!(read::<i16>(K::I16, json!(3.0)).unwrap(), 3);
        assert_eq!(read::<i64>(K::I64, json!("42")).unwrap(), 42);
        assert_eq!(read::<f32>(K::F32, json!(1.5)).unwrap(), 1.5);
        assert_eq!(read::<u128>(K::U128, json!(u128::MAX.to_string())).unwrap(), u128::MAX);
        assert!(read::<f64>(K::F64, json!("inf")).unwrap().is_infinite());

        assert!(matches!(read::<u8>(K::U8, json!(300)), Err(JsonError::TypeMismatch { .. })));
        assert!(matches!(read::<i32>(K::I32, json!(1.5)), Err(JsonError::TypeMismatch { .. })));
        assert!(matches!(read::<u32>(K::U32, json!([1])), Err(JsonError::TypeMismatch { .. })));
    }

    #[test]
    fn text_conversions() {
        assert_eq!(read::<String>(K::String, json!(12)).unwrap(), "12");
        assert!(read::<bool>(K::Bool, json!("TRUE")).unwrap());
        assert_eq!(read::<char>(K::Char, json!("é")).unwrap(), 'é');
        assert!(read::<char>(K::Char, json!("ab")).is_err());
        assert_eq!(read::<Vec<u8>>(K::Bytes, json!("AQID")).unwrap(), [1, 2, 3]);
        assert_eq!(read::<Vec<u8>>(K::Bytes, json!([1, 2, 3])).unwrap(), [1, 2, 3]);
        assert_eq!(read::<Duration>(K::Duration, json!(2)).unwrap(), Duration::from_secs(2));
        assert_eq!(read::<Duration>(K::Duration, json!("PT0.5S")).unwrap(), Duration::from_millis(500));
    }

    #[cfg(feature = "uuid")]
    #[test]
    fn uuids() {
        let id = uuid::Uuid::from_u128(0x1234);
        let text = write(K::Uuid, &id);
        assert_eq!(text, "\"00000000-0000-0000-0000-000000001234\"");
        let back = read::<uuid::Uuid>(K::Uuid, serde_json::from_str(&text).unwrap()).unwrap();
        assert_eq!(back, id);
    }
}
