use alloc::boxed::Box;

use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{OptionInfo, TypeInfo, TypePath, Typed};
use crate::ops::Nullable;
use crate::registry::{GetTypeMeta, TypeRegistry};
use crate::{FromReflect, Reflect};

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["core::option::Option<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["Option<", T::type_name(), ">"]))
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("core::option")
    }
}

impl<T: Typed + FromReflect> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Option(OptionInfo::new::<Self, T>(
                || Box::new(None::<T>),
                |value| match T::take_from_reflect(value) {
                    Ok(value) => Ok(Box::new(Some(value))),
                    Err(value) => Err(value),
                },
            ))
        })
    }
}

impl<T: Typed + FromReflect> Reflect for Option<T> {
    crate::reflection::impl_reflect_common!(Option);

    #[inline]
    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        impls::option_partial_eq(self, other)
    }
}

impl<T: Typed + FromReflect> Nullable for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(Reflect::as_reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(Reflect::as_reflect_mut)
    }
}

impl<T: Typed + FromReflect> FromReflect for Option<T> {}

impl<T: Typed + FromReflect + GetTypeMeta> GetTypeMeta for Option<T> {
    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};

    #[test]
    fn option_info_builds_values() {
        assert_eq!(<Option<String>>::type_path(), "core::option::Option<alloc::string::String>");
        let info = <Option<u32>>::type_info().as_option().unwrap();
        assert_eq!(info.some_ty().path(), "u32");

        let some = info.wrap(Box::new(3_u32)).unwrap();
        assert_eq!(some.downcast_ref::<Option<u32>>(), Some(&Some(3)));
        assert!(info.wrap(Box::new(3_i8)).is_err());

        let mut value: Option<u32> = None;
        value.set(info.none()).unwrap();
        assert!(value.is_none());
    }
}
