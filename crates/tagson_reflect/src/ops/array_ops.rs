use crate::Reflect;

/// A trait for fixed-size arrays via reflection.
///
/// Items are stored row-major. A rank-1 array has a single axis whose length
/// equals [`len`](Array::len).
pub trait Array: Reflect {
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the total number of items.
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of axes.
    #[inline]
    fn rank(&self) -> usize {
        1
    }

    /// Returns the length along `axis`.
    #[inline]
    fn dim_len(&self, axis: usize) -> usize {
        if axis == 0 { self.len() } else { 0 }
    }
}

impl dyn Array {
    #[inline]
    pub fn iter(&self) -> ArrayItemIter<'_> {
        ArrayItemIter::new(self)
    }
}

/// An iterator over the items of an [`Array`], row-major.
pub struct ArrayItemIter<'a> {
    array: &'a dyn Array,
    index: usize,
}

impl ArrayItemIter<'_> {
    #[inline(always)]
    pub const fn new(array: &dyn Array) -> ArrayItemIter<'_> {
        ArrayItemIter { array, index: 0 }
    }
}

impl<'a> Iterator for ArrayItemIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.array.get(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.array.len();
        (size - self.index, Some(size - self.index))
    }
}

impl ExactSizeIterator for ArrayItemIter<'_> {}
