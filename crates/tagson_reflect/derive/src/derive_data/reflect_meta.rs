use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Generics, Ident, ImplGenerics, Type, TypeGenerics};

use super::TypeAttributes;

/// Type-level data shared by every generated impl.
pub(crate) struct ReflectMeta<'a> {
    reflect_path: syn::Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl<'a> ReflectMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            reflect_path: crate::path::tagson_reflect(),
            attrs,
            ident,
            generics,
        }
    }

    #[inline]
    pub fn reflect_path(&self) -> &syn::Path {
        &self.reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    /// Returns `true` if the type has type parameters.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
    }

    /// Type parameter names, in declaration order.
    pub fn generic_params(&self) -> Vec<&'a Ident> {
        self.generics.type_params().map(|param| &param.ident).collect()
    }

    /// Rejects generics that cannot be reflected.
    pub fn check_generics(&self) -> syn::Result<()> {
        if let Some(lifetime) = self.generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "reflected types must be 'static and cannot have lifetime parameters",
            ));
        }
        if let Some(param) = self.generics.const_params().next() {
            return Err(syn::Error::new_spanned(
                param,
                "const parameters are not supported by `#[derive(Reflect)]`",
            ));
        }
        Ok(())
    }

    /// The non-generic part of the type path, as a `&'static str` expression.
    pub fn base_type_path(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(path) => path.to_token_stream(),
            None => {
                let ident = self.ident.to_string();
                quote!(::core::concat!(::core::module_path!(), "::", #ident))
            }
        }
    }

    /// The non-generic part of the type name.
    pub fn base_type_name(&self) -> String {
        match &self.attrs.type_path {
            Some(path) => {
                let path = path.value();
                match path.rfind("::") {
                    Some(index) => path[index + 2..].to_owned(),
                    None => path,
                }
            }
            None => self.ident.to_string(),
        }
    }

    /// The module path, as an `Option<&'static str>` expression.
    pub fn module_path(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(path) => match path.value().rfind("::") {
                Some(index) => {
                    let module = &path.value()[..index];
                    quote!(::core::option::Option::Some(#module))
                }
                None => quote!(::core::option::Option::None),
            },
            None => quote!(::core::option::Option::Some(::core::module_path!())),
        }
    }

    /// Returns `impl_generics`, `ty_generics` and a full `where` clause.
    ///
    /// Every type parameter gets a `TypePath` bound. Field types mentioning a
    /// type parameter get `Typed + FromReflect`, plus `GetTypeMeta` when
    /// `add_get_type_meta` is set.
    pub fn split_generics(
        &self,
        field_types: &[&Type],
        add_field_bounds: bool,
        add_get_type_meta: bool,
    ) -> (ImplGenerics<'a>, TypeGenerics<'a>, TokenStream) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let mut predicates = Vec::new();
        if let Some(where_clause) = where_clause {
            predicates.extend(where_clause.predicates.iter().map(ToTokens::to_token_stream));
        }

        let params = self
            .generics
            .type_params()
            .map(|param| param.ident.clone())
            .collect::<Vec<_>>();

        if !params.is_empty() {
            let type_path_ = crate::path::type_path_(&self.reflect_path);
            predicates.push(quote!(Self: ::core::any::Any + ::core::marker::Send + ::core::marker::Sync));
            predicates.extend(params.iter().map(|ident| quote!(#ident: #type_path_)));

            if add_field_bounds {
                let typed_ = crate::path::typed_(&self.reflect_path);
                let from_reflect_ = crate::path::from_reflect_(&self.reflect_path);
                let get_type_meta = if add_get_type_meta {
                    let get_type_meta_ = crate::path::get_type_meta_(&self.reflect_path);
                    quote!(+ #get_type_meta_)
                } else {
                    TokenStream::new()
                };

                for ty in field_types {
                    if mentions_any(&params, ty.to_token_stream()) {
                        predicates.push(quote!(#ty: #typed_ + #from_reflect_ #get_type_meta));
                    }
                }
            }
        }

        let where_clause = if predicates.is_empty() {
            TokenStream::new()
        } else {
            quote!(where #(#predicates,)*)
        };

        (impl_generics, ty_generics, where_clause)
    }
}

/// Does any of `idents` appear in `tokens`?
fn mentions_any(idents: &[Ident], tokens: TokenStream) -> bool {
    tokens.into_iter().any(|tree| match tree {
        proc_macro2::TokenTree::Ident(ident) => idents.contains(&ident),
        proc_macro2::TokenTree::Group(group) => mentions_any(idents, group.stream()),
        _ => false,
    })
}
