use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `GetTypeMeta`.
///
/// Registering a type also registers every reflected field type.
pub(crate) fn impl_trait_get_type_meta(meta: &ReflectMeta, field_types: &[&Type]) -> TokenStream {
    let reflect_path = meta.reflect_path();
    let get_type_meta_ = crate::path::get_type_meta_(reflect_path);
    let type_registry_ = crate::path::type_registry_(reflect_path);

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) =
        meta.split_generics(field_types, true, true);

    let body = if field_types.is_empty() {
        TokenStream::new()
    } else {
        quote! {
            #[inline]
            fn register_dependencies(registry: &mut #type_registry_) {
                #( registry.register::<#field_types>(); )*
            }
        }
    };

    quote! {
        impl #impl_generics #get_type_meta_ for #ident #ty_generics #where_clause {
            #body
        }
    }
}
