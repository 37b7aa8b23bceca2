use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{DefaultFn, Type, TypePath};

/// Information for opaque (scalar) types such as numbers, `String` or `Duration`.
///
/// Opaque values are read and written as a whole. What they look like on the
/// wire is decided by the codec from the [`Type`].
#[derive(Clone, Debug)]
pub struct OpaqueInfo {
    ty: Type,
    default: Option<DefaultFn>,
}

impl OpaqueInfo {
    /// Creates a new [`OpaqueInfo`] without a default value.
    #[inline]
    pub const fn new<T: TypePath + ?Sized>() -> Self {
        Self {
            ty: Type::of::<T>(),
            default: None,
        }
    }

    /// Sets the function building the default value.
    #[inline]
    pub const fn with_default(mut self, default: DefaultFn) -> Self {
        self.default = Some(default);
        self
    }

    crate::info::impl_type_fn!(ty);

    /// Returns the default value, if the type exposes one.
    #[inline]
    pub fn default_value(&self) -> Option<Box<dyn Reflect>> {
        self.default.map(|f| f())
    }
}
