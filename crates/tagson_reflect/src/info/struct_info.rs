use alloc::boxed::Box;
use alloc::vec::Vec;

use tagson_utils::hash::HashMap;

use crate::Reflect;
use crate::info::{ConstructFn, DefaultFn, NamedField, Type, TypePath};
use crate::ops::ConstructError;

// -----------------------------------------------------------------------------
// StructInfo

/// Information for a struct with named fields.
///
/// A struct may be built in two ways:
///
/// - from its [default value](StructInfo::default_value), then populated field
///   by field through [`Struct::field_at_mut`];
/// - through its [constructor](StructInfo::construct), which takes every field
///   value in declaration order.
///
/// `#[derive(Reflect)]` always generates the constructor, and exposes the
/// default value when the type is marked `#[reflect(default)]`.
///
/// [`Struct::field_at_mut`]: crate::ops::Struct::field_at_mut
#[derive(Clone, Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    field_indices: HashMap<&'static str, usize>,
    default: Option<DefaultFn>,
    constructor: Option<ConstructFn>,
}

impl StructInfo {
    /// Creates a new [`StructInfo`].
    ///
    /// Field names must be unique.
    pub fn new<T: TypePath>(fields: &[NamedField]) -> Self {
        let field_indices = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name(), index))
            .collect();

        Self {
            ty: Type::of::<T>(),
            fields: fields.to_vec().into_boxed_slice(),
            field_indices,
            default: None,
            constructor: None,
        }
    }

    #[inline]
    pub fn with_default(mut self, default: DefaultFn) -> Self {
        self.default = Some(default);
        self
    }

    #[inline]
    pub fn with_constructor(mut self, constructor: ConstructFn) -> Self {
        self.constructor = Some(constructor);
        self
    }

    crate::info::impl_type_fn!(ty);

    /// Returns the field with the given name.
    #[inline]
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.field_indices.get(name).map(|&index| &self.fields[index])
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_indices.get(name).copied()
    }

    #[inline]
    pub fn fields(&self) -> &[NamedField] {
        &self.fields
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    #[inline]
    pub fn default_value(&self) -> Option<Box<dyn Reflect>> {
        self.default.map(|f| f())
    }

    #[inline]
    pub const fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// Builds the struct from one value per field, in declaration order.
    pub fn construct(&self, args: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError> {
        match self.constructor {
            Some(constructor) => constructor(args),
            None => Err(ConstructError::NoConstructor {
                type_path: self.type_path(),
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// TupleInfo

/// Information for a tuple.
///
/// Tuple elements are named by position (`"0"`, `"1"`, ...). Tuples have no
/// setters of their own, so they are always built through their constructor.
#[derive(Clone, Debug)]
pub struct TupleInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    constructor: ConstructFn,
}

impl TupleInfo {
    pub fn new<T: TypePath>(fields: &[NamedField], constructor: ConstructFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.to_vec().into_boxed_slice(),
            constructor,
        }
    }

    crate::info::impl_type_fn!(ty);

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    #[inline]
    pub fn fields(&self) -> &[NamedField] {
        &self.fields
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Builds the tuple from one value per element.
    #[inline]
    pub fn construct(&self, args: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.constructor)(args)
    }
}
