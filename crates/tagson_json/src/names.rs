//! Type-name resolution for `$type` tags.

use std::sync::OnceLock;

use tagson_reflect::info::TypeInfo;
use tagson_reflect::registry::{TypeRegistry, TypeRegistryArc};

/// Maps a written type name back to its [`TypeInfo`].
///
/// Implemented by [`TypeRegistry`], which accepts both full type paths and
/// unambiguous short names.
pub trait TypeNameResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Option<&'static TypeInfo>;
}

impl TypeNameResolver for TypeRegistry {
    fn resolve(&self, name: &str) -> Option<&'static TypeInfo> {
        self.get_with_type_path(name)
            .or_else(|| self.get_with_type_name(name))
            .map(|meta| meta.type_info())
    }
}

impl TypeNameResolver for TypeRegistryArc {
    #[inline]
    fn resolve(&self, name: &str) -> Option<&'static TypeInfo> {
        self.read().resolve(name)
    }
}

/// The registry used by [`DeserializeSettings::default`].
///
/// Created on first use with the built-in scalars and every auto-registered
/// type. Types registered through the returned handle are visible to every
/// later call using the default settings.
///
/// [`DeserializeSettings::default`]: crate::settings::DeserializeSettings
pub fn default_registry() -> &'static TypeRegistryArc {
    static REGISTRY: OnceLock<TypeRegistryArc> = OnceLock::new();
    REGISTRY.get_or_init(|| TypeRegistryArc::new(TypeRegistry::new()))
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use tagson_reflect::registry::TypeRegistry;

    use super::TypeNameResolver;

    #[test]
    fn full_and_short_names() {
        let mut registry = TypeRegistry::new();
        registry.register::<Vec<String>>();

        let full = registry.resolve("alloc::vec::Vec<alloc::string::String>").unwrap();
        let short = registry.resolve("Vec<String>").unwrap();
        assert!(full.type_is::<Vec<String>>());
        assert!(short.type_is::<Vec<String>>());
        assert!(registry.resolve("Vec<Nope>").is_none());
    }
}
