use crate::Reflect;

/// A trait for `Option<T>` via reflection.
pub trait Nullable: Reflect {
    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    #[inline]
    fn is_none(&self) -> bool {
        self.value().is_none()
    }
}
