use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Reflect;
use crate::info::{FromElementsFn, InfoFn, Type, TypeInfo, TypePath, Typed};
use crate::ops::ConstructError;

/// Information for arrays: `[T; N]`, `Box<[T]>`, `Arc<[T]>` and
/// [`MultiArray<T>`](crate::MultiArray).
///
/// Arrays are allocated once, from the full list of their elements. `rank`
/// is the number of dimensions, `fixed_len` is `Some(N)` for `[T; N]`.
#[derive(Clone, Debug)]
pub struct ArrayInfo {
    ty: Type,
    item: Type,
    item_info: InfoFn,
    rank: usize,
    fixed_len: Option<usize>,
    from_elements: FromElementsFn,
}

impl ArrayInfo {
    #[inline]
    pub const fn new<TArray: TypePath, TItem: Typed>(
        rank: usize,
        fixed_len: Option<usize>,
        from_elements: FromElementsFn,
    ) -> Self {
        Self {
            ty: Type::of::<TArray>(),
            item: Type::of::<TItem>(),
            item_info: TItem::type_info,
            rank,
            fixed_len,
            from_elements,
        }
    }

    crate::info::impl_type_fn!(ty);

    #[inline]
    pub const fn item_ty(&self) -> &Type {
        &self.item
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    #[inline]
    pub const fn rank(&self) -> usize {
        self.rank
    }

    #[inline]
    pub const fn fixed_len(&self) -> Option<usize> {
        self.fixed_len
    }

    /// Builds an array from its dimension lengths and row-major elements.
    #[inline]
    pub fn from_elements(
        &self,
        dims: &[usize],
        elements: Vec<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.from_elements)(dims, elements)
    }

    /// An empty array, or `[T; N]` filled with the default of `T`.
    pub fn default_value(&self) -> Option<Box<dyn Reflect>> {
        match self.fixed_len {
            Some(len) => {
                let item_info = self.item_info();
                let elements = (0..len)
                    .map(|_| item_info.default_value())
                    .collect::<Option<Vec<_>>>()?;
                self.from_elements(&[len], elements).ok()
            }
            None => {
                let dims = alloc::vec![0; self.rank];
                self.from_elements(&dims, Vec::new()).ok()
            }
        }
    }
}
