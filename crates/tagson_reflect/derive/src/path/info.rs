use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn type_path_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::info::TypePath
    }
}

#[inline(always)]
pub(crate) fn typed_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn named_field_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::info::NamedField
    }
}

#[inline(always)]
pub(crate) fn struct_info_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::info::StructInfo
    }
}

#[inline(always)]
pub(crate) fn enum_info_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::info::EnumInfo
    }
}

#[inline(always)]
pub(crate) fn variant_info_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::info::VariantInfo
    }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::impls::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::impls::GenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_path_cell_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::impls::GenericTypePathCell
    }
}
