//! Paths of `tagson_reflect` items named by generated code.
//!
//! Kept in one place so generated code follows `tagson_reflect` when its
//! modules move.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Returns the path under which `tagson_reflect` is reachable from the crate
/// being compiled.
///
/// - `::tagson_reflect` for direct dependents and for `tagson_reflect` itself.
/// - `::tagson::reflect` for crates that only depend on the facade.
///
/// Reading the manifest is not free, so the path is computed once per
/// expansion and passed around.
pub(crate) fn tagson_reflect() -> syn::Path {
    tagson_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("tagson_reflect"))
}

// -----------------------------------------------------------------------------
// Modules

mod info;
mod ops;
mod registry;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use info::*;
pub(crate) use ops::*;
pub(crate) use registry::*;

#[inline(always)]
pub(crate) fn macro_exports_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::__macro_exports
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn reflect_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::Reflect
    }
}

#[inline(always)]
pub(crate) fn from_reflect_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::FromReflect
    }
}

#[inline(always)]
pub(crate) fn impls_(reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #reflect_path::impls
    }
}
