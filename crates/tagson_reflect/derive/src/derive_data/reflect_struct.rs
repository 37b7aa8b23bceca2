use syn::{Field, Ident, Type};

use super::{FieldAttributes, ReflectMeta};

/// A struct with named fields, or a unit struct.
pub(crate) struct ReflectStruct<'a> {
    pub meta: ReflectMeta<'a>,
    pub fields: Vec<StructField<'a>>,
}

/// A named field and its reflection attributes.
pub(crate) struct StructField<'a> {
    pub data: &'a Field,
    pub attrs: FieldAttributes,
    /// Position among the fields visible to reflection, `None` when skipped.
    pub reflection_index: Option<usize>,
}

impl<'a> StructField<'a> {
    #[inline]
    pub fn ident(&self) -> &'a Ident {
        // Only named fields reach this type.
        match &self.data.ident {
            Some(ident) => ident,
            None => unreachable!("tuple fields are rejected while parsing"),
        }
    }

    #[inline]
    pub fn ty(&self) -> &'a Type {
        &self.data.ty
    }

    /// The field name without a raw-identifier prefix.
    pub fn name(&self) -> String {
        let name = self.ident().to_string();
        match name.strip_prefix("r#") {
            Some(name) => name.to_owned(),
            None => name,
        }
    }
}

impl<'a> ReflectStruct<'a> {
    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// Fields visible to reflection, in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.reflection_index.is_some())
    }

    pub fn active_types(&self) -> Vec<&'a Type> {
        self.active_fields().map(StructField::ty).collect()
    }
}
