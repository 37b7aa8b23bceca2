use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `TypePath`.
///
/// Generic types append their arguments, e.g. `my::Pair<u8, alloc::string::String>`,
/// and cache the result in a `GenericTypePathCell`.
pub(crate) fn impl_trait_type_path(meta: &ReflectMeta) -> TokenStream {
    let reflect_path = meta.reflect_path();
    let type_path_ = crate::path::type_path_(reflect_path);

    let ident = meta.ident();
    let base_path = meta.base_type_path();
    let base_name = meta.base_type_name();
    let module_path = meta.module_path();

    let (type_path, type_name, inline_flag) = if meta.impl_with_generic() {
        let path_cell_ = crate::path::generic_type_path_cell_(reflect_path);
        let impls_ = crate::path::impls_(reflect_path);
        let params = meta.generic_params();

        let join = |method: TokenStream| {
            let parts = params.iter().enumerate().map(|(index, param)| {
                let sep = if index == 0 { "<" } else { ", " };
                quote!(#sep, <#param as #type_path_>::#method())
            });
            quote!(#(#parts,)* ">")
        };
        let path_parts = join(quote!(type_path));
        let name_parts = join(quote!(type_name));

        (
            quote! {
                static CELL: #path_cell_ = #path_cell_::new();
                CELL.get_or_insert::<Self>(|| #impls_::concat(&[#base_path, #path_parts]))
            },
            quote! {
                static CELL: #path_cell_ = #path_cell_::new();
                CELL.get_or_insert::<Self>(|| #impls_::concat(&[#base_name, #name_parts]))
            },
            TokenStream::new(),
        )
    } else {
        (base_path, quote!(#base_name), quote!(#[inline]))
    };

    let (impl_generics, ty_generics, where_clause) =
        meta.split_generics(&[] as &[&Type], false, false);

    quote! {
        impl #impl_generics #type_path_ for #ident #ty_generics #where_clause {
            #inline_flag
            fn type_path() -> &'static str {
                #type_path
            }

            #inline_flag
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                #module_path
            }
        }
    }
}
