use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::impls::NonGenericTypeInfoCell;
use crate::info::{DynamicInfo, ReflectKind, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectMut, ReflectRef};
use crate::registry::GetTypeMeta;
use crate::{FromReflect, Reflect};

impl TypePath for Box<dyn Reflect> {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::boxed::Box<dyn tagson_reflect::Reflect>"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Box<dyn Reflect>"
    }
}

/// Declared as [`TypeInfo::Dynamic`]. A value in the slot reports its own info.
impl Typed for Box<dyn Reflect> {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Dynamic(DynamicInfo::new::<Self>()))
    }
}

/// Forwards everything to the boxed value, except [`Reflect::set`], which
/// replaces it.
impl Reflect for Box<dyn Reflect> {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        <dyn Reflect>::as_any(&**self)
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        <dyn Reflect>::as_any_mut(&mut **self)
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        <dyn Reflect>::into_any(*self)
    }

    #[inline]
    fn as_reflect(&self) -> &dyn Reflect {
        &**self
    }

    #[inline]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        &mut **self
    }

    #[inline]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect> {
        *self
    }

    #[inline]
    fn ty_id(&self) -> TypeId {
        <dyn Reflect>::ty_id(&**self)
    }

    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        <dyn Reflect>::reflect_type_info(&**self)
    }

    #[inline]
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value;
        Ok(())
    }

    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        <dyn Reflect>::reflect_kind(&**self)
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        <dyn Reflect>::reflect_ref(&**self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        <dyn Reflect>::reflect_mut(&mut **self)
    }

    #[inline]
    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        <dyn Reflect>::reflect_partial_eq(&**self, other)
    }

    #[inline]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <dyn Reflect>::reflect_debug(&**self, f)
    }
}

impl FromReflect for Box<dyn Reflect> {
    #[inline]
    fn take_from_reflect(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        Ok(value)
    }
}

impl GetTypeMeta for Box<dyn Reflect> {}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{ReflectKind, Typed};

    #[test]
    fn boxes_are_transparent() {
        let value: Box<dyn Reflect> = Box::new(vec![1_u8]);
        let outer: Box<dyn Reflect> = Box::new(value);
        assert_eq!(outer.reflect_kind(), ReflectKind::List);
        assert_eq!(outer.reflect_type_path(), "alloc::vec::Vec<u8>");
        assert_eq!(outer.take::<alloc::vec::Vec<u8>>().ok(), Some(vec![1]));
    }

    #[test]
    fn set_replaces_content() {
        let mut slot: Box<dyn Reflect> = Box::new(1_u8);
        Reflect::set(&mut slot, Box::new(String::from("x"))).unwrap();
        assert!(slot.is::<String>());
        assert!(<Box<dyn Reflect>>::type_info().is_dynamic());
    }
}
