//! Parsed input of `#[derive(Reflect)]`.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod reflect_enum;
mod reflect_meta;
mod reflect_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, FieldDefault, TypeAttributes};
pub(crate) use reflect_enum::{EnumVariant, ReflectEnum};
pub(crate) use reflect_meta::ReflectMeta;
pub(crate) use reflect_struct::{ReflectStruct, StructField};

use syn::{Data, DeriveInput, Fields};

/// The reflected shape of the input type.
pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Enum(ReflectEnum<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let meta = ReflectMeta::new(attrs, &input.ident, &input.generics);
        meta.check_generics()?;

        match &input.data {
            Data::Struct(data) => {
                let fields = match &data.fields {
                    Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
                    Fields::Unit => Vec::new(),
                    Fields::Unnamed(fields) => {
                        return Err(syn::Error::new_spanned(
                            fields,
                            "tuple structs are not supported by `#[derive(Reflect)]`, use named fields",
                        ));
                    }
                };

                let mut index = 0;
                let fields = fields
                    .into_iter()
                    .map(|data| {
                        let attrs = FieldAttributes::parse_attrs(&data.attrs)?;
                        let reflection_index = if attrs.skip.is_some() {
                            None
                        } else {
                            index += 1;
                            Some(index - 1)
                        };
                        Ok(StructField {
                            data,
                            attrs,
                            reflection_index,
                        })
                    })
                    .collect::<syn::Result<Vec<_>>>()?;

                Ok(Self::Struct(ReflectStruct { meta, fields }))
            }
            Data::Enum(data) => {
                if meta.impl_with_generic() {
                    return Err(syn::Error::new_spanned(
                        &input.generics,
                        "generic enums are not supported by `#[derive(Reflect)]`",
                    ));
                }
                if data.variants.is_empty() {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "enums without variants cannot be reflected",
                    ));
                }
                let variants = data
                    .variants
                    .iter()
                    .map(|variant| match &variant.fields {
                        Fields::Unit => Ok(EnumVariant {
                            ident: &variant.ident,
                        }),
                        fields => Err(syn::Error::new_spanned(
                            fields,
                            "only field-less enums are supported by `#[derive(Reflect)]`",
                        )),
                    })
                    .collect::<syn::Result<Vec<_>>>()?;

                Ok(Self::Enum(ReflectEnum { meta, variants }))
            }
            Data::Union(data) => Err(syn::Error::new_spanned(
                data.union_token,
                "unions are not supported by `#[derive(Reflect)]`",
            )),
        }
    }
}
