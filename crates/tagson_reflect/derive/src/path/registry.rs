use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn get_type_meta_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::registry::GetTypeMeta
    }
}

#[inline(always)]
pub(crate) fn type_registry_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::registry::TypeRegistry
    }
}
