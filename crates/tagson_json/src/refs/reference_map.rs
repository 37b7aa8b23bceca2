use alloc::boxed::Box;
use alloc::vec::Vec;

use tagson_reflect::Reflect;
use tagson_utils::hash::HashMap;

// -----------------------------------------------------------------------------
// ReferenceMap

/// Write-side identity to id assignment. Ids start at 1.
#[derive(Debug, Default)]
pub struct ReferenceMap {
    ids: HashMap<usize, u64>,
}

impl ReferenceMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of an identity and whether it was already assigned.
    pub fn id_for(&mut self, identity: usize) -> (u64, bool) {
        let next = self.ids.len() as u64 + 1;
        let mut seen = true;
        let id = *self.ids.entry(identity).or_insert_with(|| {
            seen = false;
            next
        });
        (id, seen)
    }

    #[inline]
    pub fn get(&self, identity: usize) -> Option<u64> {
        self.ids.get(&identity).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

// -----------------------------------------------------------------------------
// VisitingStack

/// Identities on the current write path.
#[derive(Debug, Default)]
pub struct VisitingStack(Vec<usize>);

impl VisitingStack {
    #[inline]
    pub fn contains(&self, identity: usize) -> bool {
        self.0.contains(&identity)
    }

    #[inline]
    pub fn push(&mut self, identity: usize) {
        self.0.push(identity);
    }

    #[inline]
    pub fn pop(&mut self) {
        self.0.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

// -----------------------------------------------------------------------------
// ReferenceTable

/// Read-side id to handle lookup.
///
/// Handles are stored as `Shared<T>` values; a lookup hands out a new
/// handle to the same allocation.
#[derive(Default)]
pub struct ReferenceTable {
    handles: HashMap<u64, Box<dyn Reflect>>,
}

impl ReferenceTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handle. A repeated id replaces the earlier handle.
    pub fn insert(&mut self, id: u64, handle: &dyn Reflect) {
        if let Some(handle) = clone_handle(handle) {
            self.handles.insert(id, handle);
        }
    }

    pub fn resolve(&self, id: u64) -> Option<Box<dyn Reflect>> {
        self.handles.get(&id).and_then(|handle| clone_handle(&**handle))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }
}

fn clone_handle(value: &dyn Reflect) -> Option<Box<dyn Reflect>> {
    value
        .reflect_ref()
        .as_shared()
        .ok()
        .map(|handle| handle.clone_handle())
}

#[cfg(test)]
mod tests {
    use tagson_reflect::Shared;

    use super::{ReferenceMap, ReferenceTable, VisitingStack};

    #[test]
    fn ids_are_monotonic() {
        let mut map = ReferenceMap::new();
        assert_eq!(map.id_for(0x10), (1, false));
        assert_eq!(map.id_for(0x20), (2, false));
        assert_eq!(map.id_for(0x10), (1, true));
        assert_eq!(map.get(0x20), Some(2));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn visiting_stack() {
        let mut stack = VisitingStack::default();
        stack.push(7);
        assert!(stack.contains(7));
        stack.pop();
        assert!(!stack.contains(7));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn table_hands_out_same_allocation() {
        let shared = Shared::new(5_i32);
        let mut table = ReferenceTable::new();
        table.insert(1, &shared);
        table.insert(2, &5_i32);
        assert_eq!(table.len(), 1);

        let handle = table.resolve(1).unwrap();
        let handle = handle.downcast_ref::<Shared<i32>>().unwrap();
        assert_eq!(handle.identity(), shared.identity());
        assert!(table.resolve(2).is_none());
    }
}
