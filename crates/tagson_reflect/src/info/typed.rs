use crate::info::{TypeInfo, TypePath};

/// Static access to the [`TypeInfo`] of a type.
///
/// Implementations store the info in a `static` cell, so repeated calls return
/// the same reference. See [`NonGenericTypeInfoCell`] and
/// [`GenericTypeInfoCell`].
///
/// The dynamic counterpart is [`Reflect::reflect_type_info`], which `Box<dyn
/// Reflect>` forwards to the value it holds.
///
/// # Example
///
/// ```
/// use tagson_reflect::info::{Typed, TypeInfo};
///
/// let info = <Vec<u8>>::type_info();
/// assert!(matches!(info, TypeInfo::List(_)));
/// assert_eq!(info.type_name(), "Vec<u8>");
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
/// [`Reflect::reflect_type_info`]: crate::Reflect::reflect_type_info
pub trait Typed: TypePath {
    /// Returns the compile-time info for the underlying type.
    fn type_info() -> &'static TypeInfo;
}
