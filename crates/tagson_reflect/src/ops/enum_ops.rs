use crate::Reflect;
use crate::info::EnumInfo;

/// A trait for field-less enums via reflection.
pub trait Enum: Reflect {
    fn enum_info(&self) -> &'static EnumInfo;

    /// Returns the index of the current variant.
    fn variant_index(&self) -> usize;

    /// Returns the name of the current variant.
    #[inline]
    fn variant_name(&self) -> &'static str {
        match self.enum_info().variant_at(self.variant_index()) {
            Some(variant) => variant.name(),
            None => "",
        }
    }

    /// Returns the discriminant of the current variant.
    #[inline]
    fn discriminant(&self) -> i64 {
        match self.enum_info().variant_at(self.variant_index()) {
            Some(variant) => variant.discriminant(),
            None => self.variant_index() as i64,
        }
    }
}
