use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Type};

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Reflect` and `FromReflect`.
///
/// `kind` names the `ReflectKind`, `partial_eq` is the helper in
/// `tagson_reflect::impls` that compares values of that kind.
pub(crate) fn impl_trait_reflect(
    meta: &ReflectMeta,
    field_types: &[&Type],
    kind: Ident,
    partial_eq: Ident,
) -> TokenStream {
    let reflect_path = meta.reflect_path();
    let reflect_ = crate::path::reflect_(reflect_path);
    let from_reflect_ = crate::path::from_reflect_(reflect_path);
    let impls_ = crate::path::impls_(reflect_path);

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) =
        meta.split_generics(field_types, true, false);

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #reflect_path::__impl_reflect_common!(#kind);

            #[inline]
            fn reflect_partial_eq(
                &self,
                other: &dyn #reflect_,
            ) -> ::core::option::Option<bool> {
                #impls_::#partial_eq(self, other)
            }
        }

        impl #impl_generics #from_reflect_ for #ident #ty_generics #where_clause {}
    }
}
