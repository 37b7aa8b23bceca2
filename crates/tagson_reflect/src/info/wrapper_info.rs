use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{DefaultFn, InfoFn, Type, TypeInfo, TypePath, Typed, WrapFn};

// -----------------------------------------------------------------------------
// OptionInfo

/// Information for `Option<T>`.
#[derive(Clone, Debug)]
pub struct OptionInfo {
    ty: Type,
    some: Type,
    some_info: InfoFn,
    none: DefaultFn,
    wrap: WrapFn,
}

impl OptionInfo {
    #[inline]
    pub const fn new<TOption: TypePath, T: Typed>(none: DefaultFn, wrap: WrapFn) -> Self {
        Self {
            ty: Type::of::<TOption>(),
            some: Type::of::<T>(),
            some_info: T::type_info,
            none,
            wrap,
        }
    }

    crate::info::impl_type_fn!(ty);

    #[inline]
    pub const fn some_ty(&self) -> &Type {
        &self.some
    }

    #[inline]
    pub fn some_info(&self) -> &'static TypeInfo {
        (self.some_info)()
    }

    /// Builds `None`.
    #[inline]
    pub fn none(&self) -> Box<dyn Reflect> {
        (self.none)()
    }

    /// Builds `Some(value)`.
    #[inline]
    pub fn wrap(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.wrap)(value)
    }
}

// -----------------------------------------------------------------------------
// SharedInfo

/// Information for [`Shared<T>`](crate::Shared), a reference-counted handle
/// with identity.
#[derive(Clone, Debug)]
pub struct SharedInfo {
    ty: Type,
    inner: Type,
    inner_info: InfoFn,
    wrap: WrapFn,
}

impl SharedInfo {
    #[inline]
    pub const fn new<TShared: TypePath, T: Typed>(wrap: WrapFn) -> Self {
        Self {
            ty: Type::of::<TShared>(),
            inner: Type::of::<T>(),
            inner_info: T::type_info,
            wrap,
        }
    }

    crate::info::impl_type_fn!(ty);

    #[inline]
    pub const fn inner_ty(&self) -> &Type {
        &self.inner
    }

    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }

    /// Moves a value into a new handle.
    #[inline]
    pub fn wrap(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.wrap)(value)
    }
}

// -----------------------------------------------------------------------------
// ReadOnlyInfo

/// Information for read-only views such as `Arc<[T]>` or `Arc<HashMap<K, V>>`.
///
/// The view is built by constructing its mutable backing type first and
/// wrapping it afterwards.
#[derive(Clone, Debug)]
pub struct ReadOnlyInfo {
    ty: Type,
    inner: Type,
    inner_info: InfoFn,
    wrap: WrapFn,
}

impl ReadOnlyInfo {
    #[inline]
    pub const fn new<TView: TypePath, TBacking: Typed>(wrap: WrapFn) -> Self {
        Self {
            ty: Type::of::<TView>(),
            inner: Type::of::<TBacking>(),
            inner_info: TBacking::type_info,
            wrap,
        }
    }

    crate::info::impl_type_fn!(ty);

    #[inline]
    pub const fn inner_ty(&self) -> &Type {
        &self.inner
    }

    /// Returns the info of the mutable backing type.
    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }

    #[inline]
    pub fn wrap(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.wrap)(value)
    }
}

// -----------------------------------------------------------------------------
// DynamicInfo

/// Information for `Box<dyn Reflect>`: a slot that may hold any reflected value.
#[derive(Clone, Debug)]
pub struct DynamicInfo {
    ty: Type,
}

impl DynamicInfo {
    #[inline]
    pub const fn new<T: TypePath + ?Sized>() -> Self {
        Self { ty: Type::of::<T>() }
    }

    crate::info::impl_type_fn!(ty);
}
