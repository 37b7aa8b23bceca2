use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{DefaultFn, InfoFn, Type, TypeInfo, Typed};

/// A named member of a struct, or a positional element of a tuple.
///
/// Besides its declared type, a field carries its wire options:
///
/// - `alias`: an alternative key accepted when reading and used when writing.
/// - `read_only`: the field is not part of the value's public state. Writers
///   may skip it, readers still populate it.
/// - `default`: the value used when the field is missing from the input, and
///   the value compared against when omitting defaults on write.
///
/// # Example
///
/// ```
/// use tagson_reflect::info::NamedField;
///
/// let field = NamedField::new::<u32>("count").with_alias("Count");
/// assert_eq!(field.name(), "count");
/// assert_eq!(field.alias(), Some("Count"));
/// assert_eq!(field.type_path(), "u32");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct NamedField {
    name: &'static str,
    alias: Option<&'static str>,
    ty: Type,
    type_info: InfoFn,
    read_only: bool,
    default: Option<DefaultFn>,
}

impl NamedField {
    /// Creates a field of type `T`.
    #[inline]
    pub const fn new<T: Typed + ?Sized>(name: &'static str) -> Self {
        Self {
            name,
            alias: None,
            ty: Type::of::<T>(),
            type_info: T::type_info,
            read_only: false,
            default: None,
        }
    }

    #[inline]
    pub const fn with_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    #[inline]
    pub const fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    #[inline]
    pub const fn with_default(mut self, default: DefaultFn) -> Self {
        self.default = Some(default);
        self
    }

    crate::info::impl_type_fn!(ty);

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn alias(&self) -> Option<&'static str> {
        self.alias
    }

    /// Returns the [`TypeInfo`] of the declared type.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    #[inline]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Returns the field's declared default value.
    ///
    /// Does not fall back to the default of the field's type.
    #[inline]
    pub fn default_value(&self) -> Option<Box<dyn Reflect>> {
        self.default.map(|f| f())
    }
}
