//! Scalars: numbers, `bool`, `char`, `String`, `Duration`, and with features
//! `chrono` date/times and `Uuid`.

use alloc::string::String;
use core::time::Duration;

// -----------------------------------------------------------------------------
// Macro

/// Implements reflection for a scalar type.
///
/// The type must implement `Clone`, `Default`, `PartialEq` and `Debug`. It is
/// reported as [`ReflectKind::Opaque`](crate::info::ReflectKind::Opaque) and
/// its [`TypeInfo`](crate::info::TypeInfo) exposes the `Default` value.
///
/// The second argument is the type path used on the wire and defaults to the
/// type as written. The short name is the last path segment unless given as
/// a third argument.
///
/// ```
/// use tagson_reflect::{impl_reflect_opaque, info::TypePath};
///
/// #[derive(Clone, Default, PartialEq, Debug)]
/// struct Celsius(f32);
///
/// impl_reflect_opaque!(Celsius, "demo::Celsius");
///
/// assert_eq!(Celsius::type_path(), "demo::Celsius");
/// assert_eq!(Celsius::type_name(), "Celsius");
/// ```
#[macro_export]
macro_rules! impl_reflect_opaque {
    ($ty:ty) => {
        $crate::impl_reflect_opaque!($ty, stringify!($ty));
    };
    ($ty:ty, $path:expr) => {
        $crate::impl_reflect_opaque!($ty, $path, $crate::impls::short_name($path));
    };
    ($ty:ty, $path:expr, $name:expr) => {
        impl $crate::info::TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }
        }

        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::impls::NonGenericTypeInfoCell =
                    $crate::impls::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Opaque(
                        $crate::info::OpaqueInfo::new::<Self>().with_default(|| {
                            $crate::__macro_exports::Box::new(
                                <Self as ::core::default::Default>::default(),
                            )
                        }),
                    )
                })
            }
        }

        impl $crate::Reflect for $ty {
            $crate::__impl_reflect_common!(Opaque);

            fn reflect_partial_eq(&self, other: &dyn $crate::Reflect) -> ::core::option::Option<bool> {
                match other.downcast_ref::<Self>() {
                    ::core::option::Option::Some(other) => {
                        ::core::option::Option::Some(::core::cmp::PartialEq::eq(self, other))
                    }
                    ::core::option::Option::None => ::core::option::Option::Some(false),
                }
            }

            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        }

        impl $crate::FromReflect for $ty {}

        impl $crate::registry::GetTypeMeta for $ty {}
    };
}

// -----------------------------------------------------------------------------
// Impls

crate::impl_reflect_opaque!(bool);
crate::impl_reflect_opaque!(char);
crate::impl_reflect_opaque!(u8);
crate::impl_reflect_opaque!(u16);
crate::impl_reflect_opaque!(u32);
crate::impl_reflect_opaque!(u64);
crate::impl_reflect_opaque!(u128);
crate::impl_reflect_opaque!(usize);
crate::impl_reflect_opaque!(i8);
crate::impl_reflect_opaque!(i16);
crate::impl_reflect_opaque!(i32);
crate::impl_reflect_opaque!(i64);
crate::impl_reflect_opaque!(i128);
crate::impl_reflect_opaque!(isize);
crate::impl_reflect_opaque!(f32);
crate::impl_reflect_opaque!(f64);
crate::impl_reflect_opaque!(String, "alloc::string::String");
crate::impl_reflect_opaque!(Duration, "core::time::Duration");

#[cfg(feature = "chrono")]
mod chrono_impls {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

    crate::impl_reflect_opaque!(
        DateTime<Utc>,
        "chrono::DateTime<chrono::Utc>",
        "DateTime<Utc>"
    );
    crate::impl_reflect_opaque!(NaiveDate, "chrono::NaiveDate");
    crate::impl_reflect_opaque!(NaiveDateTime, "chrono::NaiveDateTime");
    crate::impl_reflect_opaque!(NaiveTime, "chrono::NaiveTime");
}

#[cfg(feature = "uuid")]
crate::impl_reflect_opaque!(uuid::Uuid, "uuid::Uuid");

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use core::time::Duration;

    use crate::Reflect;
    use crate::info::{ReflectKind, TypePath, Typed};

    #[test]
    fn scalar_paths() {
        assert_eq!(u8::type_path(), "u8");
        assert_eq!(String::type_path(), "alloc::string::String");
        assert_eq!(String::type_name(), "String");
        assert_eq!(Duration::type_name(), "Duration");
    }

    #[test]
    fn scalar_reflect() {
        let mut x = 5_i64;
        assert_eq!(x.reflect_kind(), ReflectKind::Opaque);
        assert_eq!(x.reflect_partial_eq(&5_i64), Some(true));
        assert_eq!(x.reflect_partial_eq(&5_i32), Some(false));
        x.set(Box::new(7_i64)).unwrap();
        assert_eq!(x, 7);
        assert!(x.set(Box::new(7_u8)).is_err());

        let default = f64::type_info().default_value().unwrap();
        assert_eq!(default.downcast_ref::<f64>(), Some(&0.0));
    }
}
