use alloc::vec::Vec;

use crate::ops::ConstructError;

/// A fixed-size array with `RANK` dimensions, stored row-major.
///
/// # Examples
///
/// ```
/// use tagson_reflect::MultiArray;
///
/// let grid = MultiArray::<u8, 2>::new([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(grid.get([1, 0]), Some(&4));
/// assert_eq!(grid.dims(), &[2, 3]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MultiArray<T, const RANK: usize> {
    dims: [usize; RANK],
    data: Vec<T>,
}

impl<T, const RANK: usize> MultiArray<T, RANK> {
    /// Creates an array from its dimensions and row-major items.
    ///
    /// Fails if the number of items is not the product of the dimensions.
    pub fn new(dims: [usize; RANK], data: Vec<T>) -> Result<Self, ConstructError> {
        let expected = dims.iter().product::<usize>();
        if expected != data.len() {
            return Err(ConstructError::DimensionMismatch {
                expected,
                found: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    /// Creates an array filled with clones of `value`.
    pub fn filled(dims: [usize; RANK], value: T) -> Self
    where
        T: Clone,
    {
        let len = dims.iter().product::<usize>();
        Self {
            dims,
            data: alloc::vec![value; len],
        }
    }

    #[inline]
    pub const fn dims(&self) -> &[usize; RANK] {
        &self.dims
    }

    #[inline]
    pub const fn rank(&self) -> usize {
        RANK
    }

    /// Returns the total number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns the item at the given coordinates.
    #[inline]
    pub fn get(&self, index: [usize; RANK]) -> Option<&T> {
        self.offset(index).and_then(|i| self.data.get(i))
    }

    #[inline]
    pub fn get_mut(&mut self, index: [usize; RANK]) -> Option<&mut T> {
        self.offset(index).and_then(|i| self.data.get_mut(i))
    }

    fn offset(&self, index: [usize; RANK]) -> Option<usize> {
        let mut offset = 0;
        for (i, len) in index.into_iter().zip(self.dims) {
            if i >= len {
                return None;
            }
            offset = offset * len + i;
        }
        Some(offset)
    }
}

impl<T, const RANK: usize> Default for MultiArray<T, RANK> {
    #[inline]
    fn default() -> Self {
        Self {
            dims: [0; RANK],
            data: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MultiArray;
    use crate::ops::ConstructError;

    #[test]
    fn row_major_offsets() {
        let cube = MultiArray::<u32, 3>::new([2, 2, 2], (0..8).collect()).unwrap();
        assert_eq!(cube.get([0, 0, 1]), Some(&1));
        assert_eq!(cube.get([0, 1, 0]), Some(&2));
        assert_eq!(cube.get([1, 0, 0]), Some(&4));
        assert_eq!(cube.get([2, 0, 0]), None);
    }

    #[test]
    fn rejects_wrong_size() {
        let err = MultiArray::<u8, 2>::new([2, 2], vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            ConstructError::DimensionMismatch {
                expected: 4,
                found: 3
            }
        );
    }
}
