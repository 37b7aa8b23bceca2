use crate::Reflect;
use crate::info::{ReflectKind, ReflectKindError};
use crate::ops::{Array, Enum, List, Map, Nullable, Set, SharedHandle, Struct, Tuple};

// -----------------------------------------------------------------------------
// Views

/// An immutable view of a reflected value by kind.
///
/// Created by [`Reflect::reflect_ref`].
pub enum ReflectRef<'a> {
    Opaque(&'a dyn Reflect),
    Struct(&'a dyn Struct),
    Tuple(&'a dyn Tuple),
    List(&'a dyn List),
    Array(&'a dyn Array),
    Map(&'a dyn Map),
    Set(&'a dyn Set),
    Enum(&'a dyn Enum),
    Option(&'a dyn Nullable),
    Shared(&'a dyn SharedHandle),
}

/// A mutable view of a reflected value by kind.
///
/// Created by [`Reflect::reflect_mut`].
pub enum ReflectMut<'a> {
    Opaque(&'a mut dyn Reflect),
    Struct(&'a mut dyn Struct),
    Tuple(&'a mut dyn Tuple),
    List(&'a mut dyn List),
    Array(&'a mut dyn Array),
    Map(&'a mut dyn Map),
    Set(&'a mut dyn Set),
    Enum(&'a mut dyn Enum),
    Option(&'a mut dyn Nullable),
    Shared(&'a mut dyn SharedHandle),
}

// -----------------------------------------------------------------------------
// Casts

macro_rules! impl_kind_fn {
    () => {
        /// Returns the [`ReflectKind`] of this view.
        pub fn kind(&self) -> ReflectKind {
            match self {
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
            }
        }
    };
}

macro_rules! impl_cast_fn {
    ($name:ident : $kind:ident => $ret:ty) => {
        #[inline]
        pub fn $name(self) -> Result<$ret, ReflectKindError> {
            match self {
                Self::$kind(value) => Ok(value),
                other => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: other.kind(),
                }),
            }
        }
    };
}

impl<'a> ReflectRef<'a> {
    impl_kind_fn!();

    impl_cast_fn!(as_opaque: Opaque => &'a dyn Reflect);
    impl_cast_fn!(as_struct: Struct => &'a dyn Struct);
    impl_cast_fn!(as_tuple: Tuple => &'a dyn Tuple);
    impl_cast_fn!(as_list: List => &'a dyn List);
    impl_cast_fn!(as_array: Array => &'a dyn Array);
    impl_cast_fn!(as_map: Map => &'a dyn Map);
    impl_cast_fn!(as_set: Set => &'a dyn Set);
    impl_cast_fn!(as_enum: Enum => &'a dyn Enum);
    impl_cast_fn!(as_option: Option => &'a dyn Nullable);
    impl_cast_fn!(as_shared: Shared => &'a dyn SharedHandle);
}

impl<'a> ReflectMut<'a> {
    impl_kind_fn!();

    impl_cast_fn!(as_opaque: Opaque => &'a mut dyn Reflect);
    impl_cast_fn!(as_struct: Struct => &'a mut dyn Struct);
    impl_cast_fn!(as_tuple: Tuple => &'a mut dyn Tuple);
    impl_cast_fn!(as_list: List => &'a mut dyn List);
    impl_cast_fn!(as_array: Array => &'a mut dyn Array);
    impl_cast_fn!(as_map: Map => &'a mut dyn Map);
    impl_cast_fn!(as_set: Set => &'a mut dyn Set);
    impl_cast_fn!(as_enum: Enum => &'a mut dyn Enum);
    impl_cast_fn!(as_option: Option => &'a mut dyn Nullable);
    impl_cast_fn!(as_shared: Shared => &'a mut dyn SharedHandle);
}
