use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use core::hash::Hash;
use std::collections::HashMap;

use indexmap::IndexMap;

use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{MapInfo, ReadOnlyInfo, TypeInfo, TypePath, Typed};
use crate::ops::Map;
use crate::registry::{GetTypeMeta, TypeRegistry};
use crate::{FromReflect, Reflect};

/// Implements reflection for a map type with key and value parameters.
///
/// `$new` builds an empty map from a capacity hint.
macro_rules! impl_reflect_for_map {
    ($map:ident, $path:literal, [$($key_bound:tt)+], $new:expr) => {
        impl<K: TypePath, V: TypePath> TypePath for $map<K, V> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&[$path, "<", K::type_path(), ", ", V::type_path(), ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&[
                        stringify!($map), "<", K::type_name(), ", ", V::type_name(), ">",
                    ])
                })
            }
        }

        impl<K, V> Typed for $map<K, V>
        where
            K: Typed + FromReflect + $($key_bound)+,
            V: Typed + FromReflect,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Map(MapInfo::new::<Self, K, V>(|capacity| {
                        let new: fn(usize) -> $map<K, V> = $new;
                        Box::new(new(capacity))
                    }))
                })
            }
        }

        impl<K, V> Reflect for $map<K, V>
        where
            K: Typed + FromReflect + $($key_bound)+,
            V: Typed + FromReflect,
        {
            crate::reflection::impl_reflect_common!(Map);

            #[inline]
            fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
                impls::map_partial_eq(self, other)
            }
        }

        impl<K, V> Map for $map<K, V>
        where
            K: Typed + FromReflect + $($key_bound)+,
            V: Typed + FromReflect,
        {
            #[inline]
            fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
                let key = key.downcast_ref::<K>()?;
                <$map<K, V>>::get(self, key).map(Reflect::as_reflect)
            }

            #[inline]
            fn len(&self) -> usize {
                <$map<K, V>>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
                Box::new(<$map<K, V>>::iter(self).map(|(k, v)| (k.as_reflect(), v.as_reflect())))
            }

            fn insert(
                &mut self,
                key: Box<dyn Reflect>,
                value: Box<dyn Reflect>,
            ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)> {
                let key = match K::take_from_reflect(key) {
                    Ok(key) => key,
                    Err(key) => return Err((key, value)),
                };
                match V::take_from_reflect(value) {
                    Ok(value) => {
                        <$map<K, V>>::insert(self, key, value);
                        Ok(())
                    }
                    Err(value) => Err((Box::new(key).into_reflect(), value)),
                }
            }
        }

        impl<K, V> FromReflect for $map<K, V>
        where
            K: Typed + FromReflect + $($key_bound)+,
            V: Typed + FromReflect,
        {
        }

        impl<K, V> GetTypeMeta for $map<K, V>
        where
            K: Typed + FromReflect + GetTypeMeta + $($key_bound)+,
            V: Typed + FromReflect + GetTypeMeta,
        {
            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<K>();
                registry.register::<V>();
            }
        }
    };
}

impl_reflect_for_map!(HashMap, "std::collections::HashMap", [Eq + Hash], HashMap::with_capacity);
impl_reflect_for_map!(BTreeMap, "alloc::collections::BTreeMap", [Ord], |_| BTreeMap::new());
impl_reflect_for_map!(IndexMap, "indexmap::IndexMap", [Eq + Hash], IndexMap::with_capacity);

/// Implements reflection for a read-only `Arc` view over a map.
///
/// The view reports [`TypeInfo::ReadOnly`] backed by the map itself and
/// refuses insertion.
macro_rules! impl_reflect_for_arc_map {
    ($map:ident, [$($key_bound:tt)+]) => {
        impl<K: TypePath, V: TypePath> TypePath for Arc<$map<K, V>> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&["alloc::sync::Arc<", <$map<K, V>>::type_path(), ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&["Arc<", <$map<K, V>>::type_name(), ">"])
                })
            }
        }

        impl<K, V> Typed for Arc<$map<K, V>>
        where
            K: Typed + FromReflect + $($key_bound)+,
            V: Typed + FromReflect,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::ReadOnly(ReadOnlyInfo::new::<Self, $map<K, V>>(|value| {
                        let map = value.take::<$map<K, V>>()?;
                        Ok(Box::new(Arc::new(map)))
                    }))
                })
            }
        }

        impl<K, V> Reflect for Arc<$map<K, V>>
        where
            K: Typed + FromReflect + $($key_bound)+,
            V: Typed + FromReflect,
        {
            crate::reflection::impl_reflect_common!(Map);

            #[inline]
            fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
                impls::map_partial_eq(self, other)
            }
        }

        impl<K, V> Map for Arc<$map<K, V>>
        where
            K: Typed + FromReflect + $($key_bound)+,
            V: Typed + FromReflect,
        {
            #[inline]
            fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
                Map::get(&**self, key)
            }

            #[inline]
            fn len(&self) -> usize {
                Map::len(&**self)
            }

            #[inline]
            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
                Map::iter(&**self)
            }

            #[inline]
            fn insert(
                &mut self,
                key: Box<dyn Reflect>,
                value: Box<dyn Reflect>,
            ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)> {
                Err((key, value))
            }
        }

        impl<K, V> FromReflect for Arc<$map<K, V>>
        where
            K: Typed + FromReflect + $($key_bound)+,
            V: Typed + FromReflect,
        {
        }

        impl<K, V> GetTypeMeta for Arc<$map<K, V>>
        where
            K: Typed + FromReflect + GetTypeMeta + $($key_bound)+,
            V: Typed + FromReflect + GetTypeMeta,
        {
            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<$map<K, V>>();
            }
        }
    };
}

impl_reflect_for_arc_map!(HashMap, [Eq + Hash]);
impl_reflect_for_arc_map!(BTreeMap, [Ord]);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::sync::Arc;
    use std::collections::HashMap;

    use indexmap::IndexMap;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};

    #[test]
    fn map_names() {
        assert_eq!(
            <HashMap<String, i32>>::type_path(),
            "std::collections::HashMap<alloc::string::String, i32>"
        );
        assert_eq!(<BTreeMap<u8, bool>>::type_name(), "BTreeMap<u8, bool>");
        assert_eq!(<Arc<HashMap<u8, u8>>>::type_name(), "Arc<HashMap<u8, u8>>");
    }

    #[test]
    fn insert_through_reflection() {
        let info = <IndexMap<String, i32>>::type_info().as_map().unwrap();
        let mut map = info.with_capacity(2);
        let ops = map.reflect_mut().as_map().unwrap();
        ops.insert(Box::new(String::from("b")), Box::new(2_i32)).unwrap();
        ops.insert(Box::new(String::from("a")), Box::new(1_i32)).unwrap();
        let (key, value) = ops.insert(Box::new(1_u8), Box::new(1_i32)).unwrap_err();
        assert!(key.is::<u8>() && value.is::<i32>());

        let key = String::from("a");
        assert_eq!(ops.get(&key).unwrap().downcast_ref::<i32>(), Some(&1));

        let map: IndexMap<String, i32> = map.take().unwrap();
        assert_eq!(map.keys().collect::<alloc::vec::Vec<_>>(), ["b", "a"]);
    }

    #[test]
    fn read_only_map() {
        let info = <Arc<BTreeMap<u8, u8>>>::type_info().as_read_only().unwrap();
        let backing = BTreeMap::from([(1_u8, 2_u8)]);
        let mut value = info.wrap(Box::new(backing)).unwrap();
        assert_eq!(value.reflect_kind(), crate::info::ReflectKind::Map);

        let ops = value.reflect_mut().as_map().unwrap();
        assert_eq!(ops.len(), 1);
        assert!(ops.insert(Box::new(3_u8), Box::new(4_u8)).is_err());
    }
}
