use crate::Reflect;

/// A trait for positional-field access via reflection.
///
/// Implemented for tuples up to eight elements.
///
/// ```
/// use tagson_reflect::ops::Tuple;
///
/// let value = (1_u8, String::from("a"));
/// assert_eq!(Tuple::field_len(&value), 2);
/// assert_eq!(value.field(0).unwrap().downcast_ref::<u8>(), Some(&1));
/// ```
pub trait Tuple: Reflect {
    fn field(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn field_len(&self) -> usize;
}

impl dyn Tuple {
    #[inline]
    pub fn iter_fields(&self) -> TupleFieldIter<'_> {
        TupleFieldIter::new(self)
    }
}

/// An iterator over the fields of a [`Tuple`].
pub struct TupleFieldIter<'a> {
    value: &'a dyn Tuple,
    index: usize,
}

impl TupleFieldIter<'_> {
    #[inline(always)]
    pub const fn new(value: &dyn Tuple) -> TupleFieldIter<'_> {
        TupleFieldIter { value, index: 0 }
    }
}

impl<'a> Iterator for TupleFieldIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.value.field(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.value.field_len();
        (size - self.index, Some(size - self.index))
    }
}

impl ExactSizeIterator for TupleFieldIter<'_> {}
