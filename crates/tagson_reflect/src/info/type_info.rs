use alloc::boxed::Box;
use core::{error, fmt};

use crate::Reflect;
use crate::info::{ArrayInfo, DynamicInfo, EnumInfo, ListInfo, MapInfo};
use crate::info::{OpaqueInfo, OptionInfo, ReadOnlyInfo, SetInfo};
use crate::info::{SharedInfo, StructInfo, TupleInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// The structural kind of a reflected value.
///
/// Each kind has a matching data-access trait in [`ops`](crate::ops), reached
/// through [`Reflect::reflect_ref`] and [`Reflect::reflect_mut`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Opaque,
    Struct,
    Tuple,
    List,
    Array,
    Map,
    Set,
    Enum,
    Option,
    Shared,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opaque => f.pad("Opaque"),
            Self::Struct => f.pad("Struct"),
            Self::Tuple => f.pad("Tuple"),
            Self::List => f.pad("List"),
            Self::Array => f.pad("Array"),
            Self::Map => f.pad("Map"),
            Self::Set => f.pad("Set"),
            Self::Enum => f.pad("Enum"),
            Self::Option => f.pad("Option"),
            Self::Shared => f.pad("Shared"),
        }
    }
}

/// Error returned when a value is not of the expected [`ReflectKind`].
#[derive(Debug)]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

impl fmt::Display for ReflectKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reflect kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for ReflectKindError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information about a reflected type.
///
/// Besides names and element types, every variant carries the constructor
/// function pointers needed to build values of the type at runtime, so a
/// reader holding only a `&'static TypeInfo` can produce a `Box<dyn Reflect>`
/// of the right concrete type.
///
/// `ReadOnly` and `Dynamic` only appear as *declared* types: a value never
/// reports them from [`Reflect::reflect_type_info`]. `Arc<[T]>` reports its
/// read-only info but exposes its data as an [`Array`](crate::ops::Array), and
/// `Box<dyn Reflect>` reports the info of the value it holds.
#[derive(Debug)]
pub enum TypeInfo {
    Opaque(OpaqueInfo),
    Struct(StructInfo),
    Tuple(TupleInfo),
    List(ListInfo),
    Array(ArrayInfo),
    Map(MapInfo),
    Set(SetInfo),
    Enum(EnumInfo),
    Option(OptionInfo),
    Shared(SharedInfo),
    ReadOnly(ReadOnlyInfo),
    Dynamic(DynamicInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Returns the [`", stringify!($info), "`] if this is a `", stringify!($kind), "`.")]
        #[inline]
        pub const fn $name(&self) -> Option<&$info> {
            match self {
                Self::$kind(info) => Some(info),
                _ => None,
            }
        }
    };
}

impl TypeInfo {
    /// Returns the underlying [`Type`].
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Opaque(info) => info.ty(),
            Self::Struct(info) => info.ty(),
            Self::Tuple(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Set(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::Option(info) => info.ty(),
            Self::Shared(info) => info.ty(),
            Self::ReadOnly(info) => info.ty(),
            Self::Dynamic(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn type_id(&self) -> core::any::TypeId {
        self.ty().id()
    }

    #[inline]
    pub fn type_is<T: core::any::Any>(&self) -> bool {
        self.ty().is::<T>()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    /// Returns the [`ReflectKind`] values of this type report.
    ///
    /// `ReadOnly` reports the kind of its backing type, and `Dynamic` has no
    /// kind of its own.
    pub fn kind(&self) -> Option<ReflectKind> {
        Some(match self {
            Self::Opaque(_) => ReflectKind::Opaque,
            Self::Struct(_) => ReflectKind::Struct,
            Self::Tuple(_) => ReflectKind::Tuple,
            Self::List(_) => ReflectKind::List,
            Self::Array(_) => ReflectKind::Array,
            Self::Map(_) => ReflectKind::Map,
            Self::Set(_) => ReflectKind::Set,
            Self::Enum(_) => ReflectKind::Enum,
            Self::Option(_) => ReflectKind::Option,
            Self::Shared(_) => ReflectKind::Shared,
            Self::ReadOnly(info) => return info.inner_info().kind(),
            Self::Dynamic(_) => return None,
        })
    }

    /// Builds the default value of this type, if it has one.
    ///
    /// - Opaque types, structs and enums use their `Default` impl when exposed.
    /// - Lists, maps and sets are empty.
    /// - `Option` is `None`.
    /// - `Shared` and read-only wrappers wrap the default of their target.
    pub fn default_value(&self) -> Option<Box<dyn Reflect>> {
        match self {
            Self::Opaque(info) => info.default_value(),
            Self::Struct(info) => info.default_value(),
            Self::Enum(info) => info.default_value(),
            Self::List(info) => Some(info.with_capacity(0)),
            Self::Map(info) => Some(info.with_capacity(0)),
            Self::Set(info) => Some(info.with_capacity(0)),
            Self::Array(info) => info.default_value(),
            Self::Option(info) => Some(info.none()),
            Self::Shared(info) => {
                let inner = info.inner_info().default_value()?;
                info.wrap(inner).ok()
            }
            Self::ReadOnly(info) => {
                let inner = info.inner_info().default_value()?;
                info.wrap(inner).ok()
            }
            Self::Tuple(_) | Self::Dynamic(_) => None,
        }
    }

    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_tuple: Tuple => TupleInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_set: Set => SetInfo);
    impl_cast_method!(as_enum: Enum => EnumInfo);
    impl_cast_method!(as_option: Option => OptionInfo);
    impl_cast_method!(as_shared: Shared => SharedInfo);
    impl_cast_method!(as_read_only: ReadOnly => ReadOnlyInfo);

    /// Returns `true` for `Box<dyn Reflect>` slots.
    #[inline]
    pub const fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }
}

impl PartialEq for TypeInfo {
    /// Two infos are equal if they describe the same type.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for TypeInfo {}

#[cfg(test)]
mod tests {
    use crate::info::{ReflectKind, Typed};
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn kind_and_default() {
        let info = <Vec<String>>::type_info();
        assert_eq!(info.kind(), Some(ReflectKind::List));
        let value = info.default_value().unwrap();
        assert!(value.is::<Vec<String>>());

        let info = <Option<u8>>::type_info();
        assert_eq!(info.kind(), Some(ReflectKind::Option));
        let none = info.default_value().unwrap();
        assert_eq!(none.downcast_ref::<Option<u8>>(), Some(&None));

        assert_eq!(<i32>::type_info().default_value().unwrap().take::<i32>().ok(), Some(0));
    }
}
