use alloc::boxed::Box;

use crate::Reflect;

/// A trait for unordered bags via reflection.
pub trait Set: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if an equal item is in the set.
    fn contains(&self, value: &dyn Reflect) -> bool;

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;

    /// Inserts an item, or returns it back if it has the wrong type.
    fn insert(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;
}
