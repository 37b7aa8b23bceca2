use syn::Ident;

use super::ReflectMeta;

/// A field-less enum.
pub(crate) struct ReflectEnum<'a> {
    pub meta: ReflectMeta<'a>,
    pub variants: Vec<EnumVariant<'a>>,
}

/// A unit variant.
pub(crate) struct EnumVariant<'a> {
    pub ident: &'a Ident,
}

impl<'a> ReflectEnum<'a> {
    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }
}
