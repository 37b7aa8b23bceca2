#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

//! Derive macro for `tagson_reflect`.
//!
//! - [`Reflect`](derive_reflect)
//! - [`impl_auto_register`]

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

mod derive_data;
mod impls;
mod path;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// # Reflect Derive
///
/// Implements `TypePath`, `Typed`, `Reflect`, `FromReflect`, `GetTypeMeta`
/// and `Struct` or `Enum` for the annotated type.
///
/// Supported inputs are structs with named fields, unit structs, and enums
/// whose variants carry no data.
///
/// ## Type Attributes
///
/// - `#[reflect(default)]`: the type implements `Default`, used as the
///   no-argument constructor.
/// - `#[reflect(type_path = "my::Item")]`: a stable type path, independent of
///   the module the type lives in.
/// - `#[reflect(auto_register)]`: register the type in every registry created
///   with `TypeRegistry::new`, requires the `auto_register` feature.
///
/// ## Field Attributes
///
/// - `#[reflect(alias = "Name")]`: the key used on the wire.
/// - `#[reflect(skip)]`: hide the field, it is built from its default.
/// - `#[reflect(read_only)]`: the field is not public state.
/// - `#[reflect(default)]` or `#[reflect(default = path::to::func)]`: the
///   field's declared default value.
///
/// ## Example
///
/// ```ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default, type_path = "demo::Point")]
/// struct Point {
///     x: f32,
///     #[reflect(alias = "Y")]
///     y: f32,
///     #[reflect(skip)]
///     cached: Option<f32>,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    impls::match_reflect_impls(ast)
}

/// Add a concrete type to the automatic registry.
///
/// A no-op when the `auto_register` feature is disabled.
///
/// ## Example
///
/// ```ignore
/// impl_auto_register!(demo::Point);
/// impl_auto_register!(Vec<u32>);
/// ```
#[proc_macro]
pub fn impl_auto_register(_input: TokenStream) -> TokenStream {
    #[cfg(not(feature = "auto_register"))]
    return TokenStream::new();

    #[cfg(feature = "auto_register")]
    {
        let ty = parse_macro_input!(_input as syn::Type);

        let reflect_path = path::tagson_reflect();
        let auto_register_ = path::auto_register_(&reflect_path);

        TokenStream::from(quote::quote! {
            const _: () = {
                #auto_register_::inventory::submit!{
                    #auto_register_::__AutoRegisterFunc(
                        <#ty as #auto_register_::__RegisterType>::__register
                    )
                }
            };
        })
    }
}
