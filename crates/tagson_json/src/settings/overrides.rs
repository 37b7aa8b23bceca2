use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::any::TypeId;

use tagson_reflect::Reflect;
use tagson_reflect::info::{TypeInfo, Typed};
use tagson_utils::hash::{HashMap, HashSet};

// -----------------------------------------------------------------------------
// TypeOverride

/// Customization of one type's wire form.
///
/// - aliases map member names to wire keys, and back when reading;
/// - ignored members are neither written nor read;
/// - `bind_to` substitutes the concrete type built when reading;
/// - member defaults replace the declared defaults when omitting default
///   values on write.
///
/// ```
/// use tagson_json::settings::TypeOverride;
///
/// let over = TypeOverride::new()
///     .with_alias("name", "Name")
///     .with_ignored("cache")
///     .with_default_value("count", 0u32);
///
/// assert_eq!(over.alias_of("name"), Some("Name"));
/// assert_eq!(over.member_of("name", false), Some("name"));
/// assert!(over.is_ignored("cache"));
/// ```
#[derive(Debug, Default)]
pub struct TypeOverride {
    aliases: HashMap<String, String>,
    members: HashMap<String, String>,
    ignored: HashSet<String>,
    bind_to: Option<&'static TypeInfo>,
    defaults: HashMap<String, Box<dyn Reflect>>,
}

impl TypeOverride {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `member` under `alias`, and reads `alias` into `member`.
    pub fn with_alias(mut self, member: impl Into<String>, alias: impl Into<String>) -> Self {
        let (member, alias) = (member.into(), alias.into());
        self.members.insert(alias.clone(), member.clone());
        self.aliases.insert(member, alias);
        self
    }

    pub fn with_ignored(mut self, member: impl Into<String>) -> Self {
        self.ignored.insert(member.into());
        self
    }

    /// Builds a `T` whenever this type is resolved on read.
    pub fn with_bind_to<T: Typed>(mut self) -> Self {
        self.bind_to = Some(T::type_info());
        self
    }

    pub fn with_default_value<T: Reflect>(mut self, member: impl Into<String>, value: T) -> Self {
        self.defaults.insert(member.into(), Box::new(value));
        self
    }

    #[inline]
    pub fn alias_of(&self, member: &str) -> Option<&str> {
        self.aliases.get(member).map(String::as_str)
    }

    /// Returns the member written under `key`.
    ///
    /// Falls back to ASCII case-insensitive matching unless `case_sensitive`.
    pub fn member_of(&self, key: &str, case_sensitive: bool) -> Option<&str> {
        if let Some(member) = self.members.get(key) {
            return Some(member);
        }
        if case_sensitive {
            return None;
        }
        self.members
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(key))
            .map(|(_, member)| member.as_str())
    }

    #[inline]
    pub fn is_ignored(&self, member: &str) -> bool {
        self.ignored.contains(member)
    }

    #[inline]
    pub fn bind_to(&self) -> Option<&'static TypeInfo> {
        self.bind_to
    }

    #[inline]
    pub fn default_value(&self, member: &str) -> Option<&dyn Reflect> {
        self.defaults.get(member).map(|value| value.as_reflect())
    }
}

// -----------------------------------------------------------------------------
// TypeOverrides

/// The [`TypeOverride`]s of a call, keyed by type.
///
/// Cloning is cheap, entries are shared.
#[derive(Clone, Debug, Default)]
pub struct TypeOverrides {
    map: HashMap<TypeId, Arc<TypeOverride>>,
}

impl TypeOverrides {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the override of `T`, replacing any previous one.
    pub fn with<T: Typed>(mut self, value: TypeOverride) -> Self {
        self.insert(T::type_info(), value);
        self
    }

    pub fn insert(&mut self, info: &'static TypeInfo, value: TypeOverride) {
        self.map.insert(info.type_id(), Arc::new(value));
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeOverride> {
        self.map.get(&type_id).map(Arc::as_ref)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use tagson_reflect::info::Typed;

    use super::{TypeOverride, TypeOverrides};

    #[test]
    fn alias_lookup() {
        let over = TypeOverride::new().with_alias("first_name", "FirstName");
        assert_eq!(over.member_of("FirstName", true), Some("first_name"));
        assert_eq!(over.member_of("firstname", true), None);
        assert_eq!(over.member_of("firstname", false), Some("first_name"));
    }

    #[test]
    fn overrides_by_type() {
        let overrides = TypeOverrides::new().with::<u32>(TypeOverride::new().with_bind_to::<u64>());
        let over = overrides.get(u32::type_info().type_id()).unwrap();
        assert!(over.bind_to().unwrap().type_is::<u64>());
        assert!(overrides.get(u64::type_info().type_id()).is_none());
    }

    #[test]
    fn member_defaults() {
        let over = TypeOverride::new().with_default_value("count", 7u32);
        let value = over.default_value("count").unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&7));
        assert!(over.default_value("other").is_none());
    }
}
