use core::time::Duration;

use tagson_reflect::info::{ListOrder, TypeInfo};

use super::cache::TypeCache;

// -----------------------------------------------------------------------------
// PrimitiveKind

/// Scalars with a direct JSON form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Char,
    String,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    /// `core::time::Duration`, written as ISO-8601 seconds (`PT1.5S`).
    Duration,
    /// `chrono::DateTime<Utc>`, RFC 3339.
    DateTime,
    /// `chrono::NaiveDate`.
    Date,
    /// `chrono::NaiveDateTime`.
    NaiveDateTime,
    /// `chrono::NaiveTime`.
    Time,
    /// `uuid::Uuid`, hyphenated.
    Uuid,
    /// `Vec<u8>`, base64.
    Bytes,
}

impl PrimitiveKind {
    /// Returns the kind of an opaque scalar type.
    pub fn of(info: &TypeInfo) -> Option<Self> {
        macro_rules! match_types {
            ($($ty:ty => $kind:ident),* $(,)?) => {
                $(
                    if info.type_is::<$ty>() {
                        return Some(Self::$kind);
                    }
                )*
            };
        }

        match_types! {
            bool => Bool,
            char => Char,
            alloc::string::String => String,
            i8 => I8,
            i16 => I16,
            i32 => I32,
            i64 => I64,
            i128 => I128,
            isize => Isize,
            u8 => U8,
            u16 => U16,
            u32 => U32,
            u64 => U64,
            u128 => U128,
            usize => Usize,
            f32 => F32,
            f64 => F64,
            Duration => Duration,
            alloc::vec::Vec<u8> => Bytes,
        }

        #[cfg(feature = "chrono")]
        match_types! {
            chrono::DateTime<chrono::Utc> => DateTime,
            chrono::NaiveDate => Date,
            chrono::NaiveDateTime => NaiveDateTime,
            chrono::NaiveTime => Time,
        }

        #[cfg(feature = "uuid")]
        match_types! {
            uuid::Uuid => Uuid,
        }

        None
    }

    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::I128
                | Self::Isize
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::U128
                | Self::Usize
        )
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Kinds an untyped read produces on its own, so `Auto` never tags them.
    #[inline]
    pub const fn is_self_describing(self) -> bool {
        matches!(self, Self::Bool | Self::String | Self::I64 | Self::F64)
    }
}

// -----------------------------------------------------------------------------
// TypeShape

/// Collections with a non-default item discipline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialContainer {
    Stack,
    Queue,
    Bag,
}

/// How the engines treat values of a type.
///
/// `Option<T>`, `Shared<T>` and read-only views take the shape of what they
/// hold, except that an optional primitive is a `NullablePrimitive`.
#[derive(Clone, Copy, Debug)]
pub enum TypeShape {
    Primitive(PrimitiveKind),
    NullablePrimitive(PrimitiveKind),
    Enum,
    Array {
        element: &'static TypeShape,
        rank: usize,
    },
    HomogeneousList {
        item: &'static TypeInfo,
    },
    HomogeneousMap {
        key: &'static TypeInfo,
        value: &'static TypeInfo,
    },
    SpecialContainer(SpecialContainer),
    PlainObject,
    /// Tuples: positional, built through their constructor.
    Anonymous,
    /// A scalar without a JSON form.
    Opaque,
}

impl TypeShape {
    #[inline]
    pub const fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(kind) | Self::NullablePrimitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Written as a JSON array.
    #[inline]
    pub const fn is_collection(&self) -> bool {
        matches!(
            self,
            Self::Array { .. } | Self::HomogeneousList { .. } | Self::SpecialContainer(_) | Self::Anonymous
        )
    }

    /// Written as a JSON object.
    #[inline]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::PlainObject | Self::HomogeneousMap { .. })
    }
}

static SHAPES: TypeCache<TypeShape> = TypeCache::new();

/// Returns the cached [`TypeShape`] of a type.
///
/// ```
/// use tagson_json::shape::{PrimitiveKind, TypeShape, classify};
/// use tagson_reflect::info::Typed;
///
/// assert!(matches!(classify(u8::type_info()), TypeShape::Primitive(PrimitiveKind::U8)));
/// assert!(matches!(
///     classify(<Option<u8>>::type_info()),
///     TypeShape::NullablePrimitive(PrimitiveKind::U8),
/// ));
/// assert!(matches!(classify(<[[u8; 2]; 2]>::type_info()), TypeShape::Array { rank: 1, .. }));
/// ```
pub fn classify(info: &'static TypeInfo) -> &'static TypeShape {
    SHAPES.get_or_insert(info.type_id(), || {
        let shape = classify_uncached(info);
        log::trace!("classified `{}` as {:?}", info.type_path(), shape);
        shape
    })
}

fn classify_uncached(info: &'static TypeInfo) -> TypeShape {
    match info {
        TypeInfo::Opaque(_) => match PrimitiveKind::of(info) {
            Some(kind) => TypeShape::Primitive(kind),
            None => TypeShape::Opaque,
        },
        TypeInfo::Option(option) => match *classify(option.some_info()) {
            TypeShape::Primitive(kind) => TypeShape::NullablePrimitive(kind),
            shape => shape,
        },
        TypeInfo::Shared(shared) => *classify(shared.inner_info()),
        TypeInfo::ReadOnly(view) => *classify(view.inner_info()),
        TypeInfo::Enum(_) => TypeShape::Enum,
        TypeInfo::Struct(_) | TypeInfo::Dynamic(_) => TypeShape::PlainObject,
        TypeInfo::Tuple(_) => TypeShape::Anonymous,
        TypeInfo::List(list) => match list.order() {
            ListOrder::Sequence if list.item_ty().is::<u8>() => TypeShape::Primitive(PrimitiveKind::Bytes),
            ListOrder::Sequence => TypeShape::HomogeneousList {
                item: list.item_info(),
            },
            ListOrder::Stack => TypeShape::SpecialContainer(SpecialContainer::Stack),
            ListOrder::Queue => TypeShape::SpecialContainer(SpecialContainer::Queue),
        },
        TypeInfo::Array(array) => TypeShape::Array {
            element: classify(array.item_info()),
            rank: array.rank(),
        },
        TypeInfo::Map(map) => TypeShape::HomogeneousMap {
            key: map.key_info(),
            value: map.value_info(),
        },
        TypeInfo::Set(_) => TypeShape::SpecialContainer(SpecialContainer::Bag),
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::{BTreeSet, VecDeque};
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use tagson_reflect::info::Typed;
    use tagson_reflect::{MultiArray, Reflect, Shared, Stack};

    use super::{PrimitiveKind, SpecialContainer, TypeShape, classify};

    #[test]
    fn primitives() {
        assert!(matches!(classify(String::type_info()), TypeShape::Primitive(PrimitiveKind::String)));
        assert!(matches!(classify(<Vec<u8>>::type_info()), TypeShape::Primitive(PrimitiveKind::Bytes)));
        assert!(matches!(
            classify(<Option<f64>>::type_info()),
            TypeShape::NullablePrimitive(PrimitiveKind::F64)
        ));
    }

    #[test]
    fn containers() {
        let TypeShape::HomogeneousList { item } = classify(<Vec<String>>::type_info()) else {
            panic!("expected a list");
        };
        assert!(item.type_is::<String>());

        assert!(matches!(
            classify(<Stack<u8>>::type_info()),
            TypeShape::SpecialContainer(SpecialContainer::Stack)
        ));
        assert!(matches!(
            classify(<VecDeque<u8>>::type_info()),
            TypeShape::SpecialContainer(SpecialContainer::Queue)
        ));
        assert!(matches!(
            classify(<BTreeSet<u8>>::type_info()),
            TypeShape::SpecialContainer(SpecialContainer::Bag)
        ));
        assert!(matches!(
            classify(<HashMap<u8, String>>::type_info()),
            TypeShape::HomogeneousMap { .. }
        ));
    }

    #[test]
    fn arrays_keep_rank() {
        let TypeShape::Array { element, rank } = classify(<MultiArray<i32, 3>>::type_info()) else {
            panic!("expected an array");
        };
        assert_eq!(*rank, 3);
        assert!(matches!(element, TypeShape::Primitive(PrimitiveKind::I32)));
    }

    #[test]
    fn wrappers_take_inner_shape() {
        assert!(matches!(classify(<Shared<Vec<u8>>>::type_info()), TypeShape::Primitive(PrimitiveKind::Bytes)));
        assert!(matches!(classify(<(u8, String)>::type_info()), TypeShape::Anonymous));
        assert!(matches!(classify(<Box<dyn Reflect>>::type_info()), TypeShape::PlainObject));
    }

    #[test]
    fn cached_once() {
        let a = classify(<Vec<i64>>::type_info());
        let b = classify(<Vec<i64>>::type_info());
        assert!(core::ptr::eq(a, b));
    }
}
