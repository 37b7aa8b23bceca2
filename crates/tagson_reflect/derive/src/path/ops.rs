use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn struct_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::ops::Struct
    }
}

#[inline(always)]
pub(crate) fn enum_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::ops::Enum
    }
}

#[inline(always)]
pub(crate) fn construct_error_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::ops::ConstructError
    }
}
