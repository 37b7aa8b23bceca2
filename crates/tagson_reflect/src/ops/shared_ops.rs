use alloc::boxed::Box;
use core::ops::{Deref, DerefMut};

use crate::Reflect;

/// A read guard over the value behind a [`SharedHandle`].
pub type SharedReadGuard<'a> = Box<dyn Deref<Target = dyn Reflect> + 'a>;

/// A write guard over the value behind a [`SharedHandle`].
pub type SharedWriteGuard<'a> = Box<dyn DerefMut<Target = dyn Reflect> + 'a>;

/// A trait for identity-bearing handles via reflection.
///
/// Two handles with the same [`identity`](SharedHandle::identity) point to
/// the same value. Identities are only stable while a handle is alive.
///
/// ```
/// use tagson_reflect::{Shared, ops::SharedHandle};
///
/// let a = Shared::new(5_i32);
/// let b = a.clone();
/// assert_eq!(a.identity(), b.identity());
/// assert_eq!(a.read_value().downcast_ref::<i32>(), Some(&5));
/// ```
pub trait SharedHandle: Reflect {
    /// Returns the address of the shared allocation.
    fn identity(&self) -> usize;

    /// Locks the value for reading.
    fn read_value(&self) -> SharedReadGuard<'_>;

    /// Locks the value for writing.
    fn write_value(&self) -> SharedWriteGuard<'_>;

    /// Returns a new handle to the same value.
    fn clone_handle(&self) -> Box<dyn Reflect>;
}
