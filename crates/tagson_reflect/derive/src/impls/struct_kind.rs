use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::derive_data::{FieldDefault, ReflectStruct, StructField};

/// Implement `TypePath`, `Typed`, `Reflect`, `FromReflect`, `Struct` and
/// `GetTypeMeta` for a struct with named fields.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let field_types = info.active_types();

    let type_path_trait = crate::impls::impl_trait_type_path(meta);
    let typed_trait = crate::impls::impl_trait_typed(meta, &field_types, struct_info(info));
    let reflect_trait = crate::impls::impl_trait_reflect(
        meta,
        &field_types,
        format_ident!("Struct"),
        format_ident!("struct_partial_eq"),
    );
    let struct_trait = impl_trait_struct(info);
    let get_type_meta_trait = crate::impls::impl_trait_get_type_meta(meta, &field_types);
    let auto_register = crate::impls::get_auto_register_impl(meta);

    quote! {
        #type_path_trait

        #typed_trait

        #reflect_trait

        #struct_trait

        #get_type_meta_trait

        #auto_register
    }
}

/// The value of a field default, as an expression of the field type.
fn default_expr(default: Option<&FieldDefault>) -> TokenStream {
    match default {
        Some(FieldDefault::Func(path)) => quote!(#path()),
        Some(FieldDefault::Trait) | None => quote!(::core::default::Default::default()),
    }
}

/// Builds the `StructInfo` expression.
fn struct_info(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let reflect_path = meta.reflect_path();
    let type_info_ = crate::path::type_info_(reflect_path);
    let struct_info_ = crate::path::struct_info_(reflect_path);
    let named_field_ = crate::path::named_field_(reflect_path);
    let macro_exports_ = crate::path::macro_exports_(reflect_path);

    let fields = info.active_fields().map(|field| {
        let name = field.name();
        let ty = field.ty();

        let alias = field
            .attrs
            .alias
            .as_ref()
            .map(|alias| quote!(.with_alias(#alias)));
        let read_only = field.attrs.read_only.map(|_| quote!(.with_read_only(true)));
        let default = field.attrs.default.as_ref().map(|default| {
            let value = default_expr(Some(default));
            quote! {
                .with_default(|| {
                    let value: #ty = #value;
                    #macro_exports_::Box::new(value)
                })
            }
        });

        quote! {
            #named_field_::new::<#ty>(#name) #alias #read_only #default
        }
    });

    let constructor = constructor(info);
    let default = meta
        .attrs()
        .default
        .map(|_| quote!(.with_default(|| #macro_exports_::Box::new(<Self as ::core::default::Default>::default()))));

    quote! {
        #type_info_::Struct(
            #struct_info_::new::<Self>(&[ #(#fields),* ])
                .with_constructor(#constructor)
                #default
        )
    }
}

/// The constructor takes the reflected fields in order, skipped fields fall
/// back to their defaults.
fn constructor(info: &ReflectStruct) -> TokenStream {
    let reflect_path = info.meta().reflect_path();
    let reflect_ = crate::path::reflect_(reflect_path);
    let impls_ = crate::path::impls_(reflect_path);
    let construct_error_ = crate::path::construct_error_(reflect_path);
    let macro_exports_ = crate::path::macro_exports_(reflect_path);

    let count = info.active_fields().count();
    let args = (0..count)
        .map(|index| format_ident!("__arg{}", index))
        .collect::<Vec<_>>();

    let inits = info.fields.iter().map(|field: &StructField| {
        let ident = field.ident();
        match field.reflection_index {
            Some(index) => {
                let ty = field.ty();
                let arg = &args[index];
                quote!(#ident: #impls_::take_arg::<#ty>(#index, #arg)?)
            }
            None => {
                let value = default_expr(field.attrs.default.as_ref());
                quote!(#ident: #value)
            }
        }
    });

    quote! {
        |args| {
            let found = args.len();
            let [#(#args),*] = match <[#macro_exports_::Box<dyn #reflect_>; #count] as ::core::convert::TryFrom<
                #macro_exports_::Vec<#macro_exports_::Box<dyn #reflect_>>,
            >>::try_from(args) {
                ::core::result::Result::Ok(args) => args,
                ::core::result::Result::Err(_) => {
                    return ::core::result::Result::Err(#construct_error_::ArgumentCount {
                        expected: #count,
                        found,
                    });
                }
            };
            ::core::result::Result::Ok(#macro_exports_::Box::new(Self { #(#inits),* }))
        }
    }
}

/// Generate implementation code for `Struct`.
fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let reflect_path = meta.reflect_path();
    let struct_ = crate::path::struct_(reflect_path);
    let reflect_ = crate::path::reflect_(reflect_path);
    let typed_ = crate::path::typed_(reflect_path);
    let type_info_ = crate::path::type_info_(reflect_path);
    let struct_info_ = crate::path::struct_info_(reflect_path);

    let (indices, idents): (Vec<_>, Vec<_>) = info
        .active_fields()
        .filter_map(|field| Some((field.reflection_index?, field.ident())))
        .unzip();

    let ident = meta.ident();
    let field_types = info.active_types();
    let (impl_generics, ty_generics, where_clause) =
        meta.split_generics(&field_types, true, false);

    quote! {
        impl #impl_generics #struct_ for #ident #ty_generics #where_clause {
            fn struct_info(&self) -> &'static #struct_info_ {
                match <Self as #typed_>::type_info() {
                    #type_info_::Struct(info) => info,
                    _ => ::core::unreachable!(),
                }
            }

            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #( #indices => ::core::option::Option::Some(#reflect_::as_reflect(&self.#idents)), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #reflect_> {
                match index {
                    #( #indices => ::core::option::Option::Some(#reflect_::as_reflect_mut(&mut self.#idents)), )*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
