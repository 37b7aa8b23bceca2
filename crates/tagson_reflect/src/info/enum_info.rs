use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{DefaultFn, Type, TypePath};

/// A unit variant of a reflected enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariantInfo {
    name: &'static str,
    discriminant: i64,
}

impl VariantInfo {
    #[inline]
    pub const fn new(name: &'static str, discriminant: i64) -> Self {
        Self { name, discriminant }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn discriminant(&self) -> i64 {
        self.discriminant
    }
}

/// Information for a field-less enum.
///
/// Values are built from a variant index through `from_index`.
#[derive(Clone, Debug)]
pub struct EnumInfo {
    ty: Type,
    variants: Box<[VariantInfo]>,
    from_index: fn(usize) -> Option<Box<dyn Reflect>>,
    default: Option<DefaultFn>,
}

impl EnumInfo {
    pub fn new<T: TypePath>(
        variants: &[VariantInfo],
        from_index: fn(usize) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            variants: variants.into(),
            from_index,
            default: None,
        }
    }

    #[inline]
    pub fn with_default(mut self, default: DefaultFn) -> Self {
        self.default = Some(default);
        self
    }

    crate::info::impl_type_fn!(ty);

    #[inline]
    pub fn variants(&self) -> &[VariantInfo] {
        &self.variants
    }

    #[inline]
    pub fn variant_at(&self, index: usize) -> Option<&VariantInfo> {
        self.variants.get(index)
    }

    /// Finds a variant index by name, exactly.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name == name)
    }

    /// Finds a variant index by name, ignoring ASCII case.
    pub fn index_of_ignore_case(&self, name: &str) -> Option<usize> {
        self.variants
            .iter()
            .position(|v| v.name.eq_ignore_ascii_case(name))
    }

    /// Finds a variant index by discriminant.
    pub fn index_of_discriminant(&self, discriminant: i64) -> Option<usize> {
        self.variants
            .iter()
            .position(|v| v.discriminant == discriminant)
    }

    /// Builds the variant at `index`.
    #[inline]
    pub fn build(&self, index: usize) -> Option<Box<dyn Reflect>> {
        (self.from_index)(index)
    }

    #[inline]
    pub fn default_value(&self) -> Option<Box<dyn Reflect>> {
        self.default.map(|f| f())
    }
}
