use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{ListInfo, ListOrder, TypeInfo, TypePath, Typed};
use crate::ops::List;
use crate::registry::{GetTypeMeta, TypeRegistry};
use crate::{FromReflect, Reflect, Stack};

/// Implements everything but [`List`] for a list type with one parameter.
macro_rules! impl_reflect_for_list {
    ($list:ident, $path:literal, $order:expr) => {
        impl<T: TypePath> TypePath for $list<T> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| impls::concat(&[$path, "<", T::type_path(), ">"]))
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&[stringify!($list), "<", T::type_name(), ">"])
                })
            }
        }

        impl<T: Typed + FromReflect> Typed for $list<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::List(ListInfo::new::<Self, T>($order, |capacity| {
                        Box::new(<$list<T>>::with_capacity(capacity))
                    }))
                })
            }
        }

        impl<T: Typed + FromReflect> Reflect for $list<T> {
            crate::reflection::impl_reflect_common!(List);

            #[inline]
            fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
                impls::list_partial_eq(self, other)
            }
        }

        impl<T: Typed + FromReflect> FromReflect for $list<T> {}

        impl<T: Typed + FromReflect + GetTypeMeta> GetTypeMeta for $list<T> {
            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<T>();
            }
        }
    };
}

impl_reflect_for_list!(Vec, "alloc::vec::Vec", ListOrder::Sequence);
impl_reflect_for_list!(VecDeque, "alloc::collections::VecDeque", ListOrder::Queue);
impl_reflect_for_list!(Stack, "tagson_reflect::containers::Stack", ListOrder::Stack);

impl<T: Typed + FromReflect> List for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice().get_mut(index).map(Reflect::as_reflect_mut)
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        Vec::push(self, T::take_from_reflect(value)?);
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T: Typed + FromReflect> List for VecDeque<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        VecDeque::get_mut(self, index).map(Reflect::as_reflect_mut)
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        self.push_back(T::take_from_reflect(value)?);
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T: Typed + FromReflect> List for Stack<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        Stack::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        Stack::get_mut(self, index).map(Reflect::as_reflect_mut)
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        Stack::push(self, T::take_from_reflect(value)?);
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        Stack::len(self)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::VecDeque;
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::info::{ListOrder, TypePath, Typed};
    use crate::ops::List;
    use crate::{Reflect, Stack};

    #[test]
    fn list_orders() {
        let order = |info: &crate::info::TypeInfo| info.as_list().unwrap().order();
        assert_eq!(order(<Vec<u8>>::type_info()), ListOrder::Sequence);
        assert_eq!(order(<VecDeque<u8>>::type_info()), ListOrder::Queue);
        assert_eq!(order(<Stack<u8>>::type_info()), ListOrder::Stack);
        assert_eq!(<Stack<u8>>::type_name(), "Stack<u8>");
    }

    #[test]
    fn push_through_reflection() {
        let mut list = <Vec<String>>::type_info()
            .as_list()
            .unwrap()
            .with_capacity(2);
        let ops = list.reflect_mut().as_list().unwrap();
        ops.push(Box::new(String::from("a"))).unwrap();
        ops.push(Box::new(String::from("b"))).unwrap();
        assert!(ops.push(Box::new(1_u8)).is_err());
        assert_eq!(ops.len(), 2);

        let list: Vec<String> = list.take().unwrap();
        assert_eq!(list, ["a", "b"]);
    }

    #[test]
    fn mixed_items() {
        let mut list: Vec<Box<dyn Reflect>> = Vec::new();
        List::push(&mut list, Box::new(1_u8)).unwrap();
        List::push(&mut list, Box::new(String::from("x"))).unwrap();
        assert!(List::get(&list, 0).unwrap().is::<u8>());
        assert!(List::get(&list, 1).unwrap().is::<String>());
    }
}
