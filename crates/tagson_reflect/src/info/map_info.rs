use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{CapacityFn, InfoFn, Type, TypeInfo, TypePath, Typed};

// -----------------------------------------------------------------------------
// MapInfo

/// Information for keyed maps.
#[derive(Clone, Debug)]
pub struct MapInfo {
    ty: Type,
    key: Type,
    key_info: InfoFn,
    value: Type,
    value_info: InfoFn,
    with_capacity: CapacityFn,
}

impl MapInfo {
    #[inline]
    pub const fn new<TMap: TypePath, TKey: Typed, TValue: Typed>(
        with_capacity: CapacityFn,
    ) -> Self {
        Self {
            ty: Type::of::<TMap>(),
            key: Type::of::<TKey>(),
            key_info: TKey::type_info,
            value: Type::of::<TValue>(),
            value_info: TValue::type_info,
            with_capacity,
        }
    }

    crate::info::impl_type_fn!(ty);

    #[inline]
    pub const fn key_ty(&self) -> &Type {
        &self.key
    }

    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key_info)()
    }

    #[inline]
    pub const fn value_ty(&self) -> &Type {
        &self.value
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }

    #[inline]
    pub fn with_capacity(&self, capacity: usize) -> Box<dyn Reflect> {
        (self.with_capacity)(capacity)
    }
}

// -----------------------------------------------------------------------------
// SetInfo

/// Information for unordered sets ("bags").
#[derive(Clone, Debug)]
pub struct SetInfo {
    ty: Type,
    item: Type,
    item_info: InfoFn,
    with_capacity: CapacityFn,
}

impl SetInfo {
    #[inline]
    pub const fn new<TSet: TypePath, TItem: Typed>(with_capacity: CapacityFn) -> Self {
        Self {
            ty: Type::of::<TSet>(),
            item: Type::of::<TItem>(),
            item_info: TItem::type_info,
            with_capacity,
        }
    }

    crate::info::impl_type_fn!(ty);

    #[inline]
    pub const fn item_ty(&self) -> &Type {
        &self.item
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    #[inline]
    pub fn with_capacity(&self, capacity: usize) -> Box<dyn Reflect> {
        (self.with_capacity)(capacity)
    }
}
