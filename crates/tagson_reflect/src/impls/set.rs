use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use core::hash::Hash;
use std::collections::HashSet;

use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{SetInfo, TypeInfo, TypePath, Typed};
use crate::ops::Set;
use crate::registry::{GetTypeMeta, TypeRegistry};
use crate::{FromReflect, Reflect};

macro_rules! impl_reflect_for_set {
    ($set:ident, $path:literal, [$($bound:tt)+], $new:expr) => {
        impl<T: TypePath> TypePath for $set<T> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| impls::concat(&[$path, "<", T::type_path(), ">"]))
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&[stringify!($set), "<", T::type_name(), ">"])
                })
            }
        }

        impl<T: Typed + FromReflect + $($bound)+> Typed for $set<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Set(SetInfo::new::<Self, T>(|capacity| {
                        let new: fn(usize) -> $set<T> = $new;
                        Box::new(new(capacity))
                    }))
                })
            }
        }

        impl<T: Typed + FromReflect + $($bound)+> Reflect for $set<T> {
            crate::reflection::impl_reflect_common!(Set);

            #[inline]
            fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
                impls::set_partial_eq(self, other)
            }
        }

        impl<T: Typed + FromReflect + $($bound)+> Set for $set<T> {
            #[inline]
            fn len(&self) -> usize {
                <$set<T>>::len(self)
            }

            #[inline]
            fn contains(&self, value: &dyn Reflect) -> bool {
                value
                    .downcast_ref::<T>()
                    .is_some_and(|value| <$set<T>>::contains(self, value))
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new(<$set<T>>::iter(self).map(Reflect::as_reflect))
            }

            fn insert(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                <$set<T>>::insert(self, T::take_from_reflect(value)?);
                Ok(())
            }
        }

        impl<T: Typed + FromReflect + $($bound)+> FromReflect for $set<T> {}

        impl<T: Typed + FromReflect + GetTypeMeta + $($bound)+> GetTypeMeta for $set<T> {
            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<T>();
            }
        }
    };
}

impl_reflect_for_set!(HashSet, "std::collections::HashSet", [Eq + Hash], HashSet::with_capacity);
impl_reflect_for_set!(BTreeSet, "alloc::collections::BTreeSet", [Ord], |_| BTreeSet::new());

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeSet;
    use alloc::string::String;
    use std::collections::HashSet;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};

    #[test]
    fn set_through_reflection() {
        assert_eq!(<HashSet<u8>>::type_name(), "HashSet<u8>");
        let info = <HashSet<String>>::type_info().as_set().unwrap();
        let mut set = info.with_capacity(1);
        let ops = set.reflect_mut().as_set().unwrap();
        ops.insert(Box::new(String::from("x"))).unwrap();
        ops.insert(Box::new(String::from("x"))).unwrap();
        assert!(ops.insert(Box::new(1_u32)).is_err());
        assert_eq!(ops.len(), 1);
        assert!(ops.contains(&String::from("x")));
        assert!(!ops.contains(&1_u32));
    }

    #[test]
    fn sets_compare_by_content() {
        let a = BTreeSet::from([1_u8, 2]);
        let b = BTreeSet::from([2_u8, 1]);
        assert_eq!(a.reflect_partial_eq(&b), Some(true));
        let c = BTreeSet::from([3_u8]);
        assert_eq!(a.reflect_partial_eq(&c), Some(false));
    }
}
