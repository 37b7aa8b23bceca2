use core::any::TypeId;

use tagson_reflect::info::{TypeInfo, Typed};
use tagson_utils::hash::HashSet;

use super::TypeOverrides;

// -----------------------------------------------------------------------------
// Enums

/// Layout of the produced text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Formatting {
    /// Compact, no whitespace.
    #[default]
    None,
    /// One member per line, indented with tabs.
    Tab,
    /// One member per line, indented with the given number of spaces (at most 16).
    Spaces(u8),
}

/// When `$type` tags are written.
///
/// Strings and booleans are never tagged. Types listed in
/// [`SerializeSettings::tag_suppressed`] are never tagged under `Auto`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeTagPolicy {
    /// Never.
    None,
    /// When the runtime type differs from the declared type of the slot.
    #[default]
    Auto,
    /// On every object, and on primitives whose type differs from the slot.
    Objects,
    /// On every list, array and set, and on primitives whose type differs
    /// from the slot.
    Arrays,
    /// On every object and collection, and on primitives whose type differs
    /// from the slot.
    All,
}

/// Which name of a type is written into tags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeNameInfo {
    /// The full type path, e.g. `my_app::model::Node`.
    #[default]
    Full,
    /// The short type name, e.g. `Node`.
    Short,
}

impl TypeNameInfo {
    #[inline]
    pub fn name_of(self, info: &TypeInfo) -> &'static str {
        match self {
            Self::Full => info.type_path(),
            Self::Short => info.type_name(),
        }
    }
}

// -----------------------------------------------------------------------------
// SerializeSettings

/// Settings of the write engine.
///
/// ```
/// use tagson_json::settings::{Formatting, SerializeSettings, TypeTagPolicy};
///
/// let settings = SerializeSettings::default()
///     .with_formatting(Formatting::Spaces(2))
///     .with_type_tags(TypeTagPolicy::None)
///     .with_preserve_references(true);
///
/// assert!(settings.preserve_references);
/// ```
#[derive(Clone, Debug)]
pub struct SerializeSettings {
    pub formatting: Formatting,
    /// Escape every non-ASCII character as `\uXXXX`.
    pub escape_unicode: bool,
    /// Keep member and map keys as declared. Otherwise they are written in
    /// ASCII lower case.
    pub case_sensitive: bool,
    pub type_tags: TypeTagPolicy,
    pub type_name_info: TypeNameInfo,
    /// Write `$id` on the first visit of a shared value and `$ref` later on.
    pub preserve_references: bool,
    /// Write tags as ordinals into a `$types` table next to the root `$value`.
    pub global_typing: bool,
    /// Maximum nesting of objects and collections, `0` for no limit.
    pub max_depth: usize,
    pub error_on_circular_ref: bool,
    pub error_on_max_depth: bool,
    pub ignore_null_values: bool,
    pub ignore_null_list_items: bool,
    pub ignore_default_values: bool,
    pub ignore_empty_collections: bool,
    pub ignore_read_only: bool,
    /// Sort struct members and string map keys.
    pub order_keys: bool,
    /// Write enum variant names rather than discriminants.
    pub use_enum_names: bool,
    /// Write every map as a `$kv` pair list.
    pub use_kv_model_for_maps: bool,
    pub overrides: TypeOverrides,
    /// Types never tagged under [`TypeTagPolicy::Auto`].
    pub tag_suppressed: HashSet<TypeId>,
}

impl Default for SerializeSettings {
    fn default() -> Self {
        let mut tag_suppressed = HashSet::default();
        tag_suppressed.insert(crate::default_dictionary_info().type_id());
        tag_suppressed.insert(crate::default_list_info().type_id());

        Self {
            formatting: Formatting::None,
            escape_unicode: false,
            case_sensitive: true,
            type_tags: TypeTagPolicy::Auto,
            type_name_info: TypeNameInfo::Full,
            preserve_references: false,
            global_typing: false,
            max_depth: 128,
            error_on_circular_ref: true,
            error_on_max_depth: true,
            ignore_null_values: false,
            ignore_null_list_items: false,
            ignore_default_values: false,
            ignore_empty_collections: false,
            ignore_read_only: false,
            order_keys: false,
            use_enum_names: true,
            use_kv_model_for_maps: false,
            overrides: TypeOverrides::new(),
            tag_suppressed,
        }
    }
}

macro_rules! impl_with {
    ($($name:ident: $field:ident: $ty:ty),* $(,)?) => {
        impl SerializeSettings {
            $(
                #[inline]
                pub fn $name(mut self, value: $ty) -> Self {
                    self.$field = value;
                    self
                }
            )*
        }
    };
}

impl_with! {
    with_formatting: formatting: Formatting,
    with_escape_unicode: escape_unicode: bool,
    with_case_sensitive: case_sensitive: bool,
    with_type_tags: type_tags: TypeTagPolicy,
    with_type_name_info: type_name_info: TypeNameInfo,
    with_preserve_references: preserve_references: bool,
    with_global_typing: global_typing: bool,
    with_max_depth: max_depth: usize,
    with_error_on_circular_ref: error_on_circular_ref: bool,
    with_error_on_max_depth: error_on_max_depth: bool,
    with_ignore_null_values: ignore_null_values: bool,
    with_ignore_null_list_items: ignore_null_list_items: bool,
    with_ignore_default_values: ignore_default_values: bool,
    with_ignore_empty_collections: ignore_empty_collections: bool,
    with_ignore_read_only: ignore_read_only: bool,
    with_order_keys: order_keys: bool,
    with_use_enum_names: use_enum_names: bool,
    with_use_kv_model_for_maps: use_kv_model_for_maps: bool,
    with_overrides: overrides: TypeOverrides,
}

impl SerializeSettings {
    /// Never tag `T` under [`TypeTagPolicy::Auto`].
    pub fn with_tag_suppressed<T: Typed>(mut self) -> Self {
        self.tag_suppressed.insert(T::type_info().type_id());
        self
    }
}
