use alloc::sync::Arc;
use core::fmt;
use core::ops::{Deref, DerefMut};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A shared, lockable handle to a value.
///
/// Cloning a `Shared` clones the handle, not the value. All clones have the
/// same identity, see [`Shared::ptr_eq`].
///
/// Two fields holding clones of one `Shared` are written once with `$id` and
/// then as `$ref`, and are read back as clones of one handle again. A graph
/// of `Shared` values may contain cycles.
///
/// Lock poisoning is ignored: a panic while holding the lock does not make
/// the value unreachable.
///
/// # Examples
///
/// ```
/// use tagson_reflect::Shared;
///
/// let a = Shared::new(vec![1, 2]);
/// let b = a.clone();
/// b.write().push(3);
/// assert_eq!(*a.read(), [1, 2, 3]);
/// assert!(Shared::ptr_eq(&a, &b));
/// ```
pub struct Shared<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Shared<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Locks the value for reading.
    #[inline]
    pub fn read(&self) -> SharedRead<'_, T> {
        SharedRead(self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Locks the value for writing.
    #[inline]
    pub fn write(&self) -> SharedWrite<'_, T> {
        SharedWrite(self.inner.write().unwrap_or_else(PoisonError::into_inner))
    }

    /// Returns `true` if both handles point to the same value.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    /// Returns the address of the shared allocation.
    #[inline]
    pub fn identity(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }

    /// Returns the number of live handles.
    #[inline]
    pub fn handle_count(this: &Self) -> usize {
        Arc::strong_count(&this.inner)
    }
}

impl<T> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Shared<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Shared<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `try_read` keeps a cyclic graph from deadlocking its own formatter.
        match self.inner.try_read() {
            Ok(value) => f.debug_tuple("Shared").field(&*value).finish(),
            Err(_) => f.write_str("Shared(<locked>)"),
        }
    }
}

/// Compares the values, not the identities.
impl<T: PartialEq> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        if Self::ptr_eq(self, other) {
            return true;
        }
        *self.read() == *other.read()
    }
}

// -----------------------------------------------------------------------------
// Guards

/// A read guard returned by [`Shared::read`].
pub struct SharedRead<'a, T>(RwLockReadGuard<'a, T>);

impl<T> Deref for SharedRead<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

/// A write guard returned by [`Shared::write`].
pub struct SharedWrite<'a, T>(RwLockWriteGuard<'a, T>);

impl<T> Deref for SharedWrite<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for SharedWrite<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::Shared;

    #[test]
    fn identity_follows_clones() {
        let a = Shared::new(1_u8);
        let b = a.clone();
        let c = Shared::new(1_u8);
        assert_eq!(a.identity(), b.identity());
        assert_ne!(a.identity(), c.identity());
        assert_eq!(a, c);
        assert_eq!(Shared::handle_count(&a), 2);
    }
}
