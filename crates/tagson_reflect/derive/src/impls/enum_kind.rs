use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::derive_data::ReflectEnum;

/// Implement `TypePath`, `Typed`, `Reflect`, `FromReflect`, `Enum` and
/// `GetTypeMeta` for a field-less enum.
pub(crate) fn impl_enum(info: &ReflectEnum) -> TokenStream {
    let meta = &info.meta;

    let type_path_trait = crate::impls::impl_trait_type_path(meta);
    let typed_trait = crate::impls::impl_trait_typed(meta, &[], enum_info(info));
    let reflect_trait = crate::impls::impl_trait_reflect(
        meta,
        &[],
        format_ident!("Enum"),
        format_ident!("enum_partial_eq"),
    );
    let enum_trait = impl_trait_enum(info);
    let get_type_meta_trait = crate::impls::impl_trait_get_type_meta(meta, &[]);
    let auto_register = crate::impls::get_auto_register_impl(meta);

    quote! {
        #type_path_trait

        #typed_trait

        #reflect_trait

        #enum_trait

        #get_type_meta_trait

        #auto_register
    }
}

fn enum_info(info: &ReflectEnum) -> TokenStream {
    let meta = &info.meta;
    let reflect_path = meta.reflect_path();
    let reflect_ = crate::path::reflect_(reflect_path);
    let type_info_ = crate::path::type_info_(reflect_path);
    let enum_info_ = crate::path::enum_info_(reflect_path);
    let variant_info_ = crate::path::variant_info_(reflect_path);
    let macro_exports_ = crate::path::macro_exports_(reflect_path);

    let idents = info.variants.iter().map(|variant| variant.ident).collect::<Vec<_>>();
    let names = idents.iter().map(|ident| ident.to_string());
    let indices = 0..idents.len();

    let default = meta
        .attrs()
        .default
        .map(|_| quote!(.with_default(|| #macro_exports_::Box::new(<Self as ::core::default::Default>::default()))));

    quote! {
        #type_info_::Enum(
            #enum_info_::new::<Self>(
                &[ #( #variant_info_::new(#names, Self::#idents as i64) ),* ],
                |index| match index {
                    #( #indices => ::core::option::Option::Some(
                        #macro_exports_::Box::new(Self::#idents) as #macro_exports_::Box<dyn #reflect_>
                    ), )*
                    _ => ::core::option::Option::None,
                },
            )
            #default
        )
    }
}

/// Generate implementation code for `Enum`.
fn impl_trait_enum(info: &ReflectEnum) -> TokenStream {
    let meta = &info.meta;
    let reflect_path = meta.reflect_path();
    let enum_ = crate::path::enum_(reflect_path);
    let typed_ = crate::path::typed_(reflect_path);
    let type_info_ = crate::path::type_info_(reflect_path);
    let enum_info_ = crate::path::enum_info_(reflect_path);

    let ident = meta.ident();
    let variants = info.variants.iter().map(|variant| variant.ident);
    let indices = 0..info.variants.len();

    quote! {
        impl #enum_ for #ident {
            fn enum_info(&self) -> &'static #enum_info_ {
                match <Self as #typed_>::type_info() {
                    #type_info_::Enum(info) => info,
                    _ => ::core::unreachable!(),
                }
            }

            #[inline]
            fn variant_index(&self) -> usize {
                match self {
                    #( Self::#variants => #indices, )*
                }
            }
        }
    }
}
