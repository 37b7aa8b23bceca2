use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use serde_json::{Map, Value};
use tagson_reflect::Reflect;
use tagson_reflect::info::{TypeInfo, Typed};
use tagson_reflect::registry::{TypeRegistry, TypeRegistryArc};

use super::TypeOverrides;
use crate::names::TypeNameResolver;

// -----------------------------------------------------------------------------
// Hooks

/// Builds the instance for a target type before the default constructor is
/// tried. Receives the input object when there is one.
///
/// Returning `None` falls back to the default construction path.
pub type Activator =
    Arc<dyn Fn(&'static TypeInfo, Option<&Map<String, Value>>) -> Option<Box<dyn Reflect>> + Send + Sync>;

/// Finds the input value of a constructor parameter.
pub type CtorParamMatcher = for<'a> fn(&str, &'a Map<String, Value>) -> Option<&'a Value>;

/// The default [`CtorParamMatcher`]: an exact key, then an ASCII
/// case-insensitive one.
///
/// ```
/// use serde_json::json;
/// use tagson_json::settings::match_ctor_param;
///
/// let input = json!({ "Name": "Ann" });
/// let map = input.as_object().unwrap();
/// assert_eq!(match_ctor_param("name", map), Some(&json!("Ann")));
/// assert_eq!(match_ctor_param("age", map), None);
/// ```
pub fn match_ctor_param<'a>(name: &str, input: &'a Map<String, Value>) -> Option<&'a Value> {
    input.get(name).or_else(|| {
        input
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

// -----------------------------------------------------------------------------
// DeserializeSettings

/// Settings of the read engine.
///
/// `type_names` resolves `$type` names. The default is a process-wide
/// registry holding the built-in scalars and every auto-registered type;
/// [`with_registry`](Self::with_registry) installs another one.
#[derive(Clone)]
pub struct DeserializeSettings {
    /// Match member keys exactly. Otherwise ASCII case is ignored.
    pub case_sensitive: bool,
    /// Maximum nesting of objects and collections, `0` for no limit.
    pub max_depth: usize,
    pub error_on_max_depth: bool,
    pub error_on_missing_member: bool,
    /// Read tuple targets as their default instead of their content.
    pub ignore_anonymous_types: bool,
    pub overrides: TypeOverrides,
    pub type_names: Arc<dyn TypeNameResolver>,
    pub activator: Option<Activator>,
    pub ctor_param_matcher: CtorParamMatcher,
    /// The map type an untyped object is read into. Its keys must be
    /// string-like.
    pub dictionary_type: &'static TypeInfo,
    /// The list, set or array type an untyped array is read into.
    pub list_type: &'static TypeInfo,
}

impl Default for DeserializeSettings {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            max_depth: 128,
            error_on_max_depth: true,
            error_on_missing_member: false,
            ignore_anonymous_types: false,
            overrides: TypeOverrides::new(),
            type_names: Arc::new(crate::names::default_registry().clone()),
            activator: None,
            ctor_param_matcher: match_ctor_param,
            dictionary_type: crate::default_dictionary_info(),
            list_type: crate::default_list_info(),
        }
    }
}

impl DeserializeSettings {
    #[inline]
    pub fn with_case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    #[inline]
    pub fn with_max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    #[inline]
    pub fn with_error_on_max_depth(mut self, value: bool) -> Self {
        self.error_on_max_depth = value;
        self
    }

    #[inline]
    pub fn with_error_on_missing_member(mut self, value: bool) -> Self {
        self.error_on_missing_member = value;
        self
    }

    #[inline]
    pub fn with_ignore_anonymous_types(mut self, value: bool) -> Self {
        self.ignore_anonymous_types = value;
        self
    }

    #[inline]
    pub fn with_overrides(mut self, value: TypeOverrides) -> Self {
        self.overrides = value;
        self
    }

    /// Resolves `$type` names through `registry`.
    pub fn with_registry(mut self, registry: TypeRegistry) -> Self {
        self.type_names = Arc::new(TypeRegistryArc::new(registry));
        self
    }

    pub fn with_type_names(mut self, resolver: Arc<dyn TypeNameResolver>) -> Self {
        self.type_names = resolver;
        self
    }

    pub fn with_activator<F>(mut self, activator: F) -> Self
    where
        F: Fn(&'static TypeInfo, Option<&Map<String, Value>>) -> Option<Box<dyn Reflect>>
            + Send
            + Sync
            + 'static,
    {
        self.activator = Some(Arc::new(activator));
        self
    }

    #[inline]
    pub fn with_ctor_param_matcher(mut self, matcher: CtorParamMatcher) -> Self {
        self.ctor_param_matcher = matcher;
        self
    }

    /// Reads untyped objects as `T`, e.g. a `BTreeMap<String, Box<dyn Reflect>>`.
    pub fn with_dictionary_type<T: Typed>(mut self) -> Self {
        self.dictionary_type = T::type_info();
        self
    }

    /// Reads untyped arrays as `T`.
    pub fn with_list_type<T: Typed>(mut self) -> Self {
        self.list_type = T::type_info();
        self
    }
}

impl fmt::Debug for DeserializeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeserializeSettings")
            .field("case_sensitive", &self.case_sensitive)
            .field("max_depth", &self.max_depth)
            .field("error_on_max_depth", &self.error_on_max_depth)
            .field("error_on_missing_member", &self.error_on_missing_member)
            .field("ignore_anonymous_types", &self.ignore_anonymous_types)
            .field("overrides", &self.overrides)
            .field("activator", &self.activator.is_some())
            .field("dictionary_type", &self.dictionary_type.type_path())
            .field("list_type", &self.list_type.type_path())
            .finish_non_exhaustive()
    }
}
