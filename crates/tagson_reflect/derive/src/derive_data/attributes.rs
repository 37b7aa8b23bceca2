//! Parsing of `#[reflect(...)]` attributes.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Path, Token};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes on the type itself.
///
/// - `default`: the type implements `Default`, expose it as the no-argument
///   constructor.
/// - `type_path = "..."`: overrides the stable type path.
/// - `auto_register`: submit the type for automatic registration.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub default: Option<Span>,
    pub type_path: Option<LitStr>,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    result.default = Some(meta.path.span());
                } else if meta.path.is_ident("auto_register") {
                    result.auto_register = Some(meta.path.span());
                } else if meta.path.is_ident("type_path") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if syn::parse_str::<Path>(&lit.value()).is_err() {
                        return Err(syn::Error::new(lit.span(), "`type_path` must be a valid path"));
                    }
                    result.type_path = Some(lit);
                } else {
                    return Err(meta.error(
                        "unknown type attribute, expected `default`, `type_path` or `auto_register`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Where a field's default value comes from.
#[derive(Debug)]
pub(crate) enum FieldDefault {
    /// `#[reflect(default)]`: the field type's `Default`.
    Trait,
    /// `#[reflect(default = path)]`: a `fn() -> FieldType`.
    Func(Path),
}

/// Attributes on a named field.
///
/// - `alias = "..."`: the key used on the wire.
/// - `skip`: the field is invisible to reflection and built from its default.
/// - `read_only`: the field is not part of the public state.
/// - `default` / `default = path`: the declared default value.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub alias: Option<LitStr>,
    pub skip: Option<Span>,
    pub read_only: Option<Span>,
    pub default: Option<FieldDefault>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("alias") {
                    result.alias = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("skip") {
                    result.skip = Some(meta.path.span());
                } else if meta.path.is_ident("read_only") {
                    result.read_only = Some(meta.path.span());
                } else if meta.path.is_ident("default") {
                    result.default = Some(if meta.input.peek(Token![=]) {
                        FieldDefault::Func(meta.value()?.parse()?)
                    } else {
                        FieldDefault::Trait
                    });
                } else {
                    return Err(meta.error(
                        "unknown field attribute, expected `alias`, `skip`, `read_only` or `default`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}
