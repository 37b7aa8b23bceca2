use core::any::TypeId;

use crate::info::{Type, TypeInfo, Typed};
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// TypeMeta

/// The registered record of one type.
#[derive(Clone, Debug)]
pub struct TypeMeta {
    ty: &'static Type,
    type_info: &'static TypeInfo,
}

impl TypeMeta {
    #[inline]
    pub fn of<T: Typed + ?Sized>() -> Self {
        let type_info = T::type_info();
        Self {
            ty: type_info.ty(),
            type_info,
        }
    }

    #[inline(always)]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    #[inline(always)]
    pub const fn ty(&self) -> &'static Type {
        self.ty
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty.name()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// Builds the [`TypeMeta`] of a type and registers its dependencies.
///
/// Implemented for every built-in type and by `#[derive(Reflect)]`.
pub trait GetTypeMeta: Typed {
    #[inline]
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }

    /// Registers the types this type is built from.
    #[inline]
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
