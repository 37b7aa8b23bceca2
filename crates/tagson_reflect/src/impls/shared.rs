use alloc::boxed::Box;
use core::ops::{Deref, DerefMut};

use crate::containers::{SharedRead, SharedWrite};
use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{SharedInfo, TypeInfo, TypePath, Typed};
use crate::ops::{SharedHandle, SharedReadGuard, SharedWriteGuard};
use crate::registry::{GetTypeMeta, TypeRegistry};
use crate::{FromReflect, Reflect, Shared};

impl<T: TypePath> TypePath for Shared<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["tagson_reflect::containers::Shared<", T::type_path(), ">"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["Shared<", T::type_name(), ">"]))
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("tagson_reflect::containers")
    }
}

impl<T: Typed + FromReflect> Typed for Shared<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Shared(SharedInfo::new::<Self, T>(|value| {
                let value = T::take_from_reflect(value)?;
                Ok(Box::new(Shared::new(value)))
            }))
        })
    }
}

impl<T: Typed + FromReflect> Reflect for Shared<T> {
    crate::reflection::impl_reflect_common!(Shared);

    #[inline]
    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        impls::shared_partial_eq(self, other)
    }
}

struct ReadGuard<'a, T>(SharedRead<'a, T>);

impl<T: Reflect> Deref for ReadGuard<'_, T> {
    type Target = dyn Reflect;

    #[inline]
    fn deref(&self) -> &dyn Reflect {
        T::as_reflect(&self.0)
    }
}

struct WriteGuard<'a, T>(SharedWrite<'a, T>);

impl<T: Reflect> Deref for WriteGuard<'_, T> {
    type Target = dyn Reflect;

    #[inline]
    fn deref(&self) -> &dyn Reflect {
        T::as_reflect(&self.0)
    }
}

impl<T: Reflect> DerefMut for WriteGuard<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut dyn Reflect {
        T::as_reflect_mut(&mut self.0)
    }
}

impl<T: Typed + FromReflect> SharedHandle for Shared<T> {
    #[inline]
    fn identity(&self) -> usize {
        Shared::identity(self)
    }

    #[inline]
    fn read_value(&self) -> SharedReadGuard<'_> {
        Box::new(ReadGuard(self.read()))
    }

    #[inline]
    fn write_value(&self) -> SharedWriteGuard<'_> {
        Box::new(WriteGuard(self.write()))
    }

    #[inline]
    fn clone_handle(&self) -> Box<dyn Reflect> {
        Box::new(self.clone())
    }
}

impl<T: Typed + FromReflect> FromReflect for Shared<T> {}

impl<T: Typed + FromReflect + GetTypeMeta> GetTypeMeta for Shared<T> {
    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::vec::Vec;

    use crate::info::{TypePath, Typed};
    use crate::{Reflect, Shared};

    #[test]
    fn handle_through_reflection() {
        assert_eq!(<Shared<u8>>::type_name(), "Shared<u8>");
        let info = <Shared<Vec<u8>>>::type_info().as_shared().unwrap();
        let value = info.wrap(Box::new(vec![1_u8])).unwrap();

        let handle = value.reflect_ref().as_shared().unwrap();
        let clone = handle.clone_handle();
        {
            let mut guard = handle.write_value();
            let list = guard.reflect_mut().as_list().unwrap();
            list.push(Box::new(2_u8)).unwrap();
        }
        let clone = clone.take::<Shared<Vec<u8>>>().unwrap();
        assert_eq!(*clone.read(), [1, 2]);
        assert_eq!(clone.identity(), handle.identity());
        assert_eq!(format!("{value:?}"), format!("Shared(#{:x})", handle.identity()));
    }
}
