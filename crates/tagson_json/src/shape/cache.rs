use alloc::boxed::Box;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock};

use tagson_utils::TypeIdMap;

/// A process-wide `TypeId -> &'static V` table.
pub(super) struct TypeCache<V: 'static>(RwLock<TypeIdMap<&'static V>>);

impl<V: Send + Sync + 'static> TypeCache<V> {
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    #[inline]
    pub fn get_or_insert(&self, type_id: TypeId, f: impl FnOnce() -> V) -> &'static V {
        match self.get(type_id) {
            Some(value) => value,
            None => self.insert(type_id, f()),
        }
    }

    #[inline(never)]
    fn get(&self, type_id: TypeId) -> Option<&'static V> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert(&self, type_id: TypeId, value: V) -> &'static V {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}
