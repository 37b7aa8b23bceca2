use alloc::boxed::Box;

use crate::Reflect;

/// A trait for keyed maps via reflection.
///
/// Keys are looked up by downcasting to the map's key type, so a lookup with
/// a key of another type finds nothing.
///
/// ```
/// use std::collections::BTreeMap;
/// use tagson_reflect::ops::Map;
///
/// let mut map: BTreeMap<String, u8> = BTreeMap::new();
/// Map::insert(&mut map, Box::new(String::from("a")), Box::new(1_u8)).unwrap();
/// let key = String::from("a");
/// assert_eq!(Map::get(&map, &key).unwrap().downcast_ref::<u8>(), Some(&1));
/// ```
pub trait Map: Reflect {
    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over entries in the map's own order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    /// Inserts an entry, replacing any previous value for the key.
    ///
    /// Returns the pair back if either has the wrong type or the map is
    /// read-only.
    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)>;
}
