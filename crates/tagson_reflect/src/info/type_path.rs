use core::any::{Any, TypeId};

// -----------------------------------------------------------------------------
// TypePath

/// A static, stable name for a type.
///
/// Unlike [`core::any::type_name`], the strings returned here are part of the
/// wire format: they are written into `$type` tags and looked up again when
/// reading. They must stay stable across compilations.
///
/// - [`type_path`](TypePath::type_path): fully qualified, e.g. `my_app::model::Node`.
/// - [`type_name`](TypePath::type_name): short, e.g. `Node`.
///
/// Generic types include their arguments in both forms, e.g.
/// `alloc::vec::Vec<i32>` and `Vec<i32>`.
///
/// Usually implemented through `#[derive(Reflect)]`.
pub trait TypePath: 'static {
    /// Returns the fully qualified path of the type.
    fn type_path() -> &'static str;

    /// Returns the short name of the type.
    fn type_name() -> &'static str;

    /// Returns the module path of the type, if it has one.
    #[inline]
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// Type

/// The identity of a type together with its [`TypePath`] names.
///
/// Equality and hashing only consider the [`TypeId`].
#[derive(Copy, Clone)]
pub struct Type {
    type_id: TypeId,
    type_path: fn() -> &'static str,
    type_name: fn() -> &'static str,
}

impl Type {
    /// Creates a [`Type`] for `T`.
    ///
    /// # Example
    ///
    /// ```
    /// # use tagson_reflect::info::Type;
    /// let ty = Type::of::<String>();
    /// assert_eq!(ty.path(), "alloc::string::String");
    /// assert_eq!(ty.name(), "String");
    /// ```
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: T::type_path,
            type_name: T::type_name,
        }
    }

    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.type_id
    }

    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        TypeId::of::<T>() == self.type_id
    }

    #[inline]
    pub fn path(&self) -> &'static str {
        (self.type_path)()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        (self.type_name)()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Type {}

impl core::hash::Hash for Type {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl core::fmt::Debug for Type {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Adds `ty`, `type_id`, `type_is`, `type_path` and `type_name` accessors to
/// an info struct holding a `ty: Type` field.
macro_rules! impl_type_fn {
    ($field:ident) => {
        #[inline(always)]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }

        #[inline]
        pub const fn type_id(&self) -> ::core::any::TypeId {
            self.$field.id()
        }

        #[inline]
        pub fn type_is<T: ::core::any::Any>(&self) -> bool {
            self.$field.is::<T>()
        }

        #[inline]
        pub fn type_path(&self) -> &'static str {
            self.$field.path()
        }

        #[inline]
        pub fn type_name(&self) -> &'static str {
            self.$field.name()
        }
    };
}

pub(crate) use impl_type_fn;

#[cfg(test)]
mod tests {
    use super::{Type, TypePath};
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn generic_paths() {
        assert_eq!(<Vec<i32>>::type_path(), "alloc::vec::Vec<i32>");
        assert_eq!(<Vec<i32>>::type_name(), "Vec<i32>");
        assert_eq!(
            <BTreeMap<String, u8>>::type_name(),
            "BTreeMap<String, u8>"
        );
        assert_eq!(<(u8, bool)>::type_name(), "(u8, bool)");
    }

    #[test]
    fn type_eq_by_id() {
        assert_eq!(Type::of::<u8>(), Type::of::<u8>());
        assert_ne!(Type::of::<u8>(), Type::of::<i8>());
        assert!(Type::of::<String>().is::<String>());
    }
}
