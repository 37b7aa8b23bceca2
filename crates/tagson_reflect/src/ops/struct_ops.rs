use crate::Reflect;
use crate::info::StructInfo;

/// A trait for named-field access via reflection.
///
/// Fields are indexed in the order of [`StructInfo::fields`]. Skipped fields
/// are not visible here.
///
/// # Examples
///
/// ```
/// use tagson_reflect::{Reflect, ops::Struct};
///
/// #[derive(Reflect)]
/// struct Node {
///     name: String,
///     weight: u32,
/// }
///
/// let node = Node { name: "a".into(), weight: 3 };
/// let s: &dyn Struct = &node;
/// assert_eq!(s.field("weight").unwrap().downcast_ref::<u32>(), Some(&3));
/// assert_eq!(s.name_at(0), Some("name"));
/// ```
pub trait Struct: Reflect {
    /// Returns the [`StructInfo`] of the underlying type.
    fn struct_info(&self) -> &'static StructInfo;

    /// Returns the field at `index`.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the field at `index`, mutably.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the number of reflected fields.
    #[inline]
    fn field_len(&self) -> usize {
        self.struct_info().field_len()
    }

    /// Returns the field named `name`.
    #[inline]
    fn field(&self, name: &str) -> Option<&dyn Reflect> {
        let index = self.struct_info().index_of(name)?;
        self.field_at(index)
    }

    /// Returns the field named `name`, mutably.
    #[inline]
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect> {
        let index = self.struct_info().index_of(name)?;
        self.field_at_mut(index)
    }

    /// Returns the name of the field at `index`.
    #[inline]
    fn name_at(&self, index: usize) -> Option<&'static str> {
        self.struct_info().field_at(index).map(|f| f.name())
    }
}

impl dyn Struct {
    #[inline]
    pub fn iter_fields(&self) -> StructFieldIter<'_> {
        StructFieldIter::new(self)
    }
}

/// An iterator over the fields of a [`Struct`].
pub struct StructFieldIter<'a> {
    value: &'a dyn Struct,
    index: usize,
}

impl StructFieldIter<'_> {
    #[inline(always)]
    pub const fn new(value: &dyn Struct) -> StructFieldIter<'_> {
        StructFieldIter { value, index: 0 }
    }
}

impl<'a> Iterator for StructFieldIter<'a> {
    type Item = (&'static str, &'a dyn Reflect);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.value.name_at(self.index)?;
        let field = self.value.field_at(self.index)?;
        self.index += 1;
        Some((name, field))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.value.field_len();
        (size - self.index, Some(size - self.index))
    }
}

impl ExactSizeIterator for StructFieldIter<'_> {}
