use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{NamedField, TupleInfo, TypeInfo, TypePath, Typed};
use crate::ops::{ConstructError, Tuple};
use crate::registry::{GetTypeMeta, TypeRegistry};
use crate::{FromReflect, Reflect};

/// Implements reflection for one tuple arity.
///
/// Each element is listed as `index: Type arg`. `$close` is the text that
/// ends the type path, so single-element tuples keep their trailing comma.
macro_rules! impl_reflect_for_tuple {
    ($len:literal, $close:literal; $($index:tt : $ty:ident $arg:ident),+) => {
        impl<$($ty: TypePath),+> TypePath for ($($ty,)+) {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let parts: &[&str] = &[$($ty::type_path()),+];
                    impls::concat(&["(", &parts.join(", "), $close])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let parts: &[&str] = &[$($ty::type_name()),+];
                    impls::concat(&["(", &parts.join(", "), $close])
                })
            }
        }

        impl<$($ty: Typed + FromReflect),+> Typed for ($($ty,)+) {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let fields = [$(NamedField::new::<$ty>(stringify!($index))),+];
                    TypeInfo::Tuple(TupleInfo::new::<Self>(&fields, |args| {
                        let args: [Box<dyn Reflect>; $len] =
                            args.try_into().map_err(|args: Vec<_>| {
                                ConstructError::ArgumentCount {
                                    expected: $len,
                                    found: args.len(),
                                }
                            })?;
                        let [$($arg),+] = args;
                        Ok(Box::new(($(impls::take_arg::<$ty>($index, $arg)?,)+)))
                    }))
                })
            }
        }

        impl<$($ty: Typed + FromReflect),+> Reflect for ($($ty,)+) {
            crate::reflection::impl_reflect_common!(Tuple);

            #[inline]
            fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
                impls::tuple_partial_eq(self, other)
            }
        }

        impl<$($ty: Typed + FromReflect),+> Tuple for ($($ty,)+) {
            fn field(&self, index: usize) -> Option<&dyn Reflect> {
                match index {
                    $($index => Some(self.$index.as_reflect()),)+
                    _ => None,
                }
            }

            fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
                match index {
                    $($index => Some(self.$index.as_reflect_mut()),)+
                    _ => None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                $len
            }
        }

        impl<$($ty: Typed + FromReflect),+> FromReflect for ($($ty,)+) {}

        impl<$($ty: Typed + FromReflect + GetTypeMeta),+> GetTypeMeta for ($($ty,)+) {
            fn register_dependencies(registry: &mut TypeRegistry) {
                $(registry.register::<$ty>();)+
            }
        }
    };
}

impl_reflect_for_tuple!(1, ",)"; 0: A a);
impl_reflect_for_tuple!(2, ")"; 0: A a, 1: B b);
impl_reflect_for_tuple!(3, ")"; 0: A a, 1: B b, 2: C c);
impl_reflect_for_tuple!(4, ")"; 0: A a, 1: B b, 2: C c, 3: D d);
impl_reflect_for_tuple!(5, ")"; 0: A a, 1: B b, 2: C c, 3: D d, 4: E e);
impl_reflect_for_tuple!(6, ")"; 0: A a, 1: B b, 2: C c, 3: D d, 4: E e, 5: F f);
impl_reflect_for_tuple!(7, ")"; 0: A a, 1: B b, 2: C c, 3: D d, 4: E e, 5: F f, 6: G g);
impl_reflect_for_tuple!(8, ")"; 0: A a, 1: B b, 2: C c, 3: D d, 4: E e, 5: F f, 6: G g, 7: H h);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::ConstructError;

    #[test]
    fn tuple_paths() {
        assert_eq!(<(u8,)>::type_path(), "(u8,)");
        assert_eq!(<(u8, String)>::type_name(), "(u8, String)");
    }

    #[test]
    fn construct_tuple() {
        let info = <(i32, String)>::type_info().as_tuple().unwrap();
        assert_eq!(info.field_at(1).unwrap().name(), "1");

        let value = info
            .construct(vec![Box::new(7_i32) as Box<dyn Reflect>, Box::new(String::from("x"))])
            .unwrap();
        assert_eq!(value.take::<(i32, String)>().ok(), Some((7, String::from("x"))));

        let err = info.construct(vec![Box::new(7_i32) as Box<dyn Reflect>]).unwrap_err();
        assert_eq!(err, ConstructError::ArgumentCount { expected: 2, found: 1 });

        let err = info
            .construct(vec![Box::new(7_i32) as Box<dyn Reflect>, Box::new(7_i32)])
            .unwrap_err();
        assert!(matches!(err, ConstructError::ArgumentType { index: 1, .. }));
    }

    #[test]
    fn tuple_fields() {
        let value = (1_u8, true, 'c');
        let tuple = value.reflect_ref().as_tuple().unwrap();
        assert_eq!(tuple.field_len(), 3);
        assert_eq!(tuple.field(2).unwrap().downcast_ref::<char>(), Some(&'c'));
        assert!(tuple.field(3).is_none());
    }
}
