use alloc::boxed::Box;

use crate::Reflect;

/// Recovers a concrete value from a boxed reflected value.
///
/// Containers use this to accept items built at runtime, e.g. `Vec<T>`
/// converts each pushed `Box<dyn Reflect>` into a `T`.
///
/// The default implementation downcasts. `Box<dyn Reflect>` accepts any value
/// as it is, which is what lets `Vec<Box<dyn Reflect>>` hold mixed items.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `FromReflect` so cannot be created through reflection",
    note = "consider annotating `{Self}` with `#[derive(Reflect)]`"
)]
pub trait FromReflect: Reflect + Sized {
    /// Takes `Self` out of `value`, or returns `value` back on mismatch.
    #[inline]
    fn take_from_reflect(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        value.take::<Self>()
    }
}
