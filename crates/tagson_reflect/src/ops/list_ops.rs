use alloc::boxed::Box;

use crate::Reflect;

/// A trait for growable sequences via reflection.
///
/// # Contract
///
/// Index 0 is the first item pushed and the largest index the last one, for
/// every list order. A stack therefore iterates bottom to top, which is also
/// the order its items must be pushed back in to rebuild it.
///
/// ```
/// use tagson_reflect::{Reflect, ops::List};
///
/// let mut vec: Vec<i32> = Vec::new();
/// let list: &mut dyn List = &mut vec;
/// list.push(Box::new(1_i32)).unwrap();
/// assert!(list.push(Box::new(String::from("no"))).is_err());
/// assert_eq!(vec, [1]);
/// ```
pub trait List: Reflect {
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Appends an item, or returns it back if it has the wrong type.
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl dyn List {
    #[inline]
    pub fn iter(&self) -> ListItemIter<'_> {
        ListItemIter::new(self)
    }
}

/// An iterator over the items of a [`List`].
pub struct ListItemIter<'a> {
    list: &'a dyn List,
    index: usize,
}

impl ListItemIter<'_> {
    /// Creates a new iterator for the given list.
    #[inline(always)]
    pub const fn new(list: &dyn List) -> ListItemIter<'_> {
        ListItemIter { list, index: 0 }
    }
}

impl<'a> Iterator for ListItemIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.list.get(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.list.len();
        (size - self.index, Some(size - self.index))
    }
}

impl ExactSizeIterator for ListItemIter<'_> {}
