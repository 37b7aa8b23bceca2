use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{ArrayInfo, ReadOnlyInfo, TypeInfo, TypePath, Typed};
use crate::ops::{Array, ConstructError};
use crate::registry::{GetTypeMeta, TypeRegistry};
use crate::{FromReflect, MultiArray, Reflect};

// -----------------------------------------------------------------------------
// Element conversion

fn take_elements<T: TypePath + FromReflect>(
    elements: Vec<Box<dyn Reflect>>,
) -> Result<Vec<T>, ConstructError> {
    elements
        .into_iter()
        .enumerate()
        .map(|(index, value)| impls::take_arg::<T>(index, value))
        .collect()
}

/// Checks that `dims` has `rank` axes whose product is `len`.
fn check_dims(dims: &[usize], rank: usize, len: usize) -> Result<(), ConstructError> {
    if dims.len() != rank {
        return Err(ConstructError::DimensionMismatch {
            expected: rank,
            found: dims.len(),
        });
    }
    let expected = dims.iter().product::<usize>();
    if expected != len {
        return Err(ConstructError::DimensionMismatch {
            expected,
            found: len,
        });
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// [T; N]

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["[", T::type_path(), "; ", &N.to_string(), "]"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["[", T::type_name(), "; ", &N.to_string(), "]"])
        })
    }
}

impl<T: Typed + FromReflect, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Array(ArrayInfo::new::<Self, T>(1, Some(N), |dims, elements| {
                check_dims(dims, 1, elements.len())?;
                let items = take_elements::<T>(elements)?;
                let found = items.len();
                match <[T; N]>::try_from(items) {
                    Ok(array) => Ok(Box::new(array)),
                    Err(_) => Err(ConstructError::DimensionMismatch { expected: N, found }),
                }
            }))
        })
    }
}

impl<T: Typed + FromReflect, const N: usize> Reflect for [T; N] {
    crate::reflection::impl_reflect_common!(Array);

    #[inline]
    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        impls::array_partial_eq(self, other)
    }
}

impl<T: Typed + FromReflect, const N: usize> Array for [T; N] {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice().get_mut(index).map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }
}

impl<T: Typed + FromReflect, const N: usize> FromReflect for [T; N] {}

impl<T: Typed + FromReflect + GetTypeMeta, const N: usize> GetTypeMeta for [T; N] {
    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

// -----------------------------------------------------------------------------
// Box<[T]>

impl<T: TypePath> TypePath for Box<[T]> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["alloc::boxed::Box<[", T::type_path(), "]>"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["Box<[", T::type_name(), "]>"]))
    }
}

impl<T: Typed + FromReflect> Typed for Box<[T]> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Array(ArrayInfo::new::<Self, T>(1, None, |dims, elements| {
                check_dims(dims, 1, elements.len())?;
                let items = take_elements::<T>(elements)?;
                Ok(Box::new(items.into_boxed_slice()))
            }))
        })
    }
}

impl<T: Typed + FromReflect> Reflect for Box<[T]> {
    crate::reflection::impl_reflect_common!(Array);

    #[inline]
    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        impls::array_partial_eq(self, other)
    }
}

impl<T: Typed + FromReflect> Array for Box<[T]> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T: Typed + FromReflect> FromReflect for Box<[T]> {}

impl<T: Typed + FromReflect + GetTypeMeta> GetTypeMeta for Box<[T]> {
    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

// -----------------------------------------------------------------------------
// Arc<[T]>

impl<T: TypePath> TypePath for Arc<[T]> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["alloc::sync::Arc<[", T::type_path(), "]>"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["Arc<[", T::type_name(), "]>"]))
    }
}

/// Reports read-only info backed by `Vec<T>`, data is exposed as an [`Array`].
impl<T: Typed + FromReflect> Typed for Arc<[T]> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::ReadOnly(ReadOnlyInfo::new::<Self, Vec<T>>(|value| {
                let items = value.take::<Vec<T>>()?;
                Ok(Box::new(Arc::<[T]>::from(items)))
            }))
        })
    }
}

impl<T: Typed + FromReflect> Reflect for Arc<[T]> {
    crate::reflection::impl_reflect_common!(Array);

    #[inline]
    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        impls::array_partial_eq(self, other)
    }
}

impl<T: Typed + FromReflect> Array for Arc<[T]> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }

    /// Only succeeds while this is the single handle to the slice.
    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        Arc::get_mut(self)?.get_mut(index).map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T: Typed + FromReflect> FromReflect for Arc<[T]> {}

impl<T: Typed + FromReflect + GetTypeMeta> GetTypeMeta for Arc<[T]> {
    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<Vec<T>>();
    }
}

// -----------------------------------------------------------------------------
// MultiArray<T, RANK>

impl<T: TypePath, const RANK: usize> TypePath for MultiArray<T, RANK> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&[
                "tagson_reflect::containers::MultiArray<",
                T::type_path(),
                ", ",
                &RANK.to_string(),
                ">",
            ])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["MultiArray<", T::type_name(), ", ", &RANK.to_string(), ">"])
        })
    }
}

impl<T: Typed + FromReflect, const RANK: usize> Typed for MultiArray<T, RANK> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Array(ArrayInfo::new::<Self, T>(RANK, None, |dims, elements| {
                check_dims(dims, RANK, elements.len())?;
                let mut shape = [0; RANK];
                shape.copy_from_slice(dims);
                let items = take_elements::<T>(elements)?;
                Ok(Box::new(MultiArray::<T, RANK>::new(shape, items)?))
            }))
        })
    }
}

impl<T: Typed + FromReflect, const RANK: usize> Reflect for MultiArray<T, RANK> {
    crate::reflection::impl_reflect_common!(Array);

    #[inline]
    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        impls::array_partial_eq(self, other)
    }
}

impl<T: Typed + FromReflect, const RANK: usize> Array for MultiArray<T, RANK> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice().get_mut(index).map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn len(&self) -> usize {
        MultiArray::len(self)
    }

    #[inline]
    fn rank(&self) -> usize {
        RANK
    }

    #[inline]
    fn dim_len(&self, axis: usize) -> usize {
        self.dims().as_slice().get(axis).copied().unwrap_or(0)
    }
}

impl<T: Typed + FromReflect, const RANK: usize> FromReflect for MultiArray<T, RANK> {}

impl<T: Typed + FromReflect + GetTypeMeta, const RANK: usize> GetTypeMeta
    for MultiArray<T, RANK>
{
    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::info::{TypePath, Typed};
    use crate::ops::ConstructError;
    use crate::{MultiArray, Reflect};

    fn boxed(items: &[i32]) -> Vec<Box<dyn Reflect>> {
        items.iter().map(|&v| Box::new(v) as Box<dyn Reflect>).collect()
    }

    #[test]
    fn fixed_array() {
        assert_eq!(<[u8; 3]>::type_path(), "[u8; 3]");
        let info = <[i32; 3]>::type_info().as_array().unwrap();
        assert_eq!(info.fixed_len(), Some(3));

        let value = info.from_elements(&[3], boxed(&[1, 2, 3])).unwrap();
        assert_eq!(value.take::<[i32; 3]>().ok(), Some([1, 2, 3]));

        let err = info.from_elements(&[2], boxed(&[1, 2])).unwrap_err();
        assert_eq!(err, ConstructError::DimensionMismatch { expected: 3, found: 2 });

        let default = info.default_value().unwrap();
        assert_eq!(default.take::<[i32; 3]>().ok(), Some([0, 0, 0]));
    }

    #[test]
    fn element_type_mismatch() {
        let info = <Box<[i32]>>::type_info().as_array().unwrap();
        let elements: Vec<Box<dyn Reflect>> = vec![Box::new(1_i32) as Box<dyn Reflect>, Box::new(2_u8)];
        let err = info.from_elements(&[2], elements).unwrap_err();
        assert_eq!(
            err,
            ConstructError::ArgumentType { index: 1, expected: "i32", found: "u8" }
        );
    }

    #[test]
    fn multi_array_shape() {
        let info = <MultiArray<i32, 2>>::type_info().as_array().unwrap();
        assert_eq!(info.rank(), 2);
        let value = info.from_elements(&[2, 2], boxed(&[1, 2, 3, 4])).unwrap();
        let array = value.reflect_ref().as_array().unwrap();
        assert_eq!(array.rank(), 2);
        assert_eq!(array.dim_len(1), 2);
        assert_eq!(array.dim_len(2), 0);
        assert!(info.from_elements(&[3], boxed(&[1, 2, 3])).is_err());

        let empty = info.default_value().unwrap();
        assert_eq!(empty.reflect_ref().as_array().unwrap().dim_len(0), 0);
    }

    #[test]
    fn read_only_slice() {
        let info = <Arc<[u8]>>::type_info();
        let read_only = info.as_read_only().unwrap();
        assert_eq!(read_only.inner_ty().path(), "alloc::vec::Vec<u8>");

        let value = read_only.wrap(Box::new(vec![1_u8, 2])).unwrap();
        assert_eq!(value.reflect_ref().as_array().unwrap().len(), 2);
        assert_eq!(&**value.downcast_ref::<Arc<[u8]>>().unwrap(), &[1, 2]);
    }
}
