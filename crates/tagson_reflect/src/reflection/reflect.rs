use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{ReflectKind, TypeInfo};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for runtime reflection in [`tagson_reflect`](crate).
///
/// A `Reflect` value can report its [`TypeInfo`] and expose its data through
/// one of the kind traits in [`ops`](crate::ops), without the caller knowing
/// its concrete type.
///
/// # Recommendations
///
/// Use [the derive macro](crate::derive::Reflect) for structs and field-less
/// enums. Scalars use [`impl_reflect_opaque!`](crate::impl_reflect_opaque).
///
/// # Type identification
///
/// [`Any::type_id`] on a `Box<dyn Reflect>` returns the id of the box. Use
/// [`Reflect::ty_id`] instead:
///
/// ```
/// # use tagson_reflect::Reflect;
/// # use core::any::TypeId;
/// let x: Box<dyn Reflect> = Box::new(32_i32);
/// assert_eq!(x.ty_id(), TypeId::of::<i32>());
/// ```
///
/// # Transparent boxes
///
/// `Box<dyn Reflect>` is itself `Reflect`. It forwards every call to the value
/// it holds, so a boxed value reports the type, kind and data of its content.
/// This is what makes `Box<dyn Reflect>` usable as a polymorphic field type.
///
/// ```
/// # use tagson_reflect::Reflect;
/// let inner: Box<dyn Reflect> = Box::new(String::from("a"));
/// let outer: Box<dyn Reflect> = Box::new(inner);
/// assert!(outer.is::<String>());
/// ```
///
/// # Manual implementation
///
/// The cast methods only differ by kind and are generated in this crate. A
/// manual implementation mirrors them:
///
/// ```rust, ignore
/// fn as_any(&self) -> &dyn Any { self }
/// fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
///     *self = value.take::<Self>()?;
///     Ok(())
/// }
/// fn reflect_kind(&self) -> ReflectKind { ReflectKind::Struct }
/// fn reflect_ref(&self) -> ReflectRef<'_> { ReflectRef::Struct(self) }
/// ```
pub trait Reflect: Send + Sync + Any {
    /// Casts to [`Any`], reaching through transparent boxes.
    fn as_any(&self) -> &dyn Any;

    /// Casts to [`Any`], reaching through transparent boxes.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Casts to a boxed [`Any`], reaching through transparent boxes.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Casts to `&dyn Reflect`.
    fn as_reflect(&self) -> &dyn Reflect;

    /// Casts to `&mut dyn Reflect`.
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    /// Casts to `Box<dyn Reflect>`.
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>;

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the [`TypeInfo`] of the underlying type.
    fn reflect_type_info(&self) -> &'static TypeInfo;

    /// Returns the [type path](crate::info::TypePath) of the underlying type.
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        self.reflect_type_info().type_path()
    }

    /// Replaces this value with `value` if they have the same type.
    ///
    /// Returns `value` back on mismatch.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns the [`ReflectKind`] of the value.
    fn reflect_kind(&self) -> ReflectKind;

    /// Returns an immutable kind view of the value.
    ///
    /// ```
    /// # use tagson_reflect::{Reflect, ops::List};
    /// let vec = vec![1, 2, 3];
    /// let list: &dyn List = vec.reflect_ref().as_list().unwrap();
    /// assert_eq!(list.len(), 3);
    /// ```
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable kind view of the value.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Returns a "partial equality" comparison result.
    ///
    /// `None` means the type does not support comparison. Scalars compare
    /// through [`PartialEq`], containers compare their items.
    #[inline]
    fn reflect_partial_eq(&self, _other: &dyn Reflect) -> Option<bool> {
        None
    }

    /// Debug formatter for the value.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::impls::reflect_debug(self.as_reflect(), f)
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            match self.into_any().downcast::<T>() {
                Ok(value) => Ok(value),
                Err(_) => unreachable!("type is already checked"),
            }
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// ```
    /// # use tagson_reflect::Reflect;
    /// let x: Box<dyn Reflect> = Box::new(10_i32);
    /// assert_eq!(x.take::<i32>().ok(), Some(10));
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements the cast methods and `set`, `reflect_kind`, `reflect_ref` and
/// `reflect_mut` for a sized type of the given kind.
///
/// Exported for [`impl_reflect_opaque!`](crate::impl_reflect_opaque) and
/// derive output.
#[doc(hidden)]
#[macro_export]
macro_rules! __impl_reflect_common {
    ($kind:ident) => {
        #[inline]
        fn as_any(&self) -> &dyn ::core::any::Any {
            self
        }

        #[inline]
        fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
            self
        }

        #[inline]
        fn into_any(
            self: $crate::__macro_exports::Box<Self>,
        ) -> $crate::__macro_exports::Box<dyn ::core::any::Any> {
            self
        }

        #[inline]
        fn as_reflect(&self) -> &dyn $crate::Reflect {
            self
        }

        #[inline]
        fn as_reflect_mut(&mut self) -> &mut dyn $crate::Reflect {
            self
        }

        #[inline]
        fn into_reflect(
            self: $crate::__macro_exports::Box<Self>,
        ) -> $crate::__macro_exports::Box<dyn $crate::Reflect> {
            self
        }

        #[inline]
        fn reflect_type_info(&self) -> &'static $crate::info::TypeInfo {
            <Self as $crate::info::Typed>::type_info()
        }

        fn set(
            &mut self,
            value: $crate::__macro_exports::Box<dyn $crate::Reflect>,
        ) -> ::core::result::Result<(), $crate::__macro_exports::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            ::core::result::Result::Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use crate::__impl_reflect_common as impl_reflect_common;
