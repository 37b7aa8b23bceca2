use alloc::borrow::Cow;
use alloc::vec::Vec;

use tagson_reflect::Reflect;
use tagson_reflect::ops::{ReflectRef, Struct};

use super::driver::{Header, WriteContext};
use crate::JsonError;
use crate::settings::{SerializeSettings, TypeOverride};
use crate::shape::{MemberDescriptor, members_of};

/// Writes a struct as an object, one entry per member that is not skipped.
pub(super) struct StructWriter<'a> {
    pub value: &'a dyn Struct,
    pub header: Header,
}

impl StructWriter<'_> {
    pub fn write(self, cx: &mut WriteContext<'_>) -> Result<(), JsonError> {
        let settings = cx.settings;
        let info = self.value.struct_info();
        let over = settings.overrides.get(info.type_id());

        let mut members = members_of(info, settings.case_sensitive)
            .iter()
            .filter(|member| !over.is_some_and(|over| over.is_ignored(member.name())))
            .filter(|member| !(settings.ignore_read_only && member.is_read_only()))
            .map(|member| {
                let key = over
                    .and_then(|over| over.alias_of(member.name()))
                    .unwrap_or(member.wire_name());
                (written_key(key, settings.case_sensitive), member)
            })
            .collect::<Vec<_>>();
        if settings.order_keys {
            members.sort_by(|a, b| a.0.cmp(&b.0));
        }

        cx.out.begin_object()?;
        cx.write_header(self.header)?;
        for (key, member) in members {
            let Some(field) = member.get(self.value) else {
                continue;
            };
            if skip_member(settings, field, member, over) {
                continue;
            }
            cx.out.key(&key)?;
            cx.write_value(field, Some(member.type_info()))?;
        }
        cx.out.end_object()
    }
}

/// Lower-cases a key unless keys are written as declared.
fn written_key(key: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive || !key.bytes().any(|byte| byte.is_ascii_uppercase()) {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(key.to_ascii_lowercase())
    }
}

fn skip_member(
    settings: &SerializeSettings,
    field: &dyn Reflect,
    member: &MemberDescriptor,
    over: Option<&TypeOverride>,
) -> bool {
    (settings.ignore_null_values && is_null(field))
        || (settings.ignore_empty_collections && is_empty_collection(field))
        || (settings.ignore_default_values && is_default(field, member, over))
}

fn is_null(value: &dyn Reflect) -> bool {
    matches!(value.reflect_ref(), ReflectRef::Option(option) if option.is_none())
}

fn is_empty_collection(value: &dyn Reflect) -> bool {
    match value.reflect_ref() {
        ReflectRef::List(list) => list.is_empty(),
        ReflectRef::Set(set) => set.is_empty(),
        ReflectRef::Map(map) => map.is_empty(),
        ReflectRef::Array(array) => array.is_empty(),
        _ => false,
    }
}

/// Compares against the override default, then the member default, then
/// the default of the member type.
fn is_default(value: &dyn Reflect, member: &MemberDescriptor, over: Option<&TypeOverride>) -> bool {
    if let Some(default) = over.and_then(|over| over.default_value(member.name())) {
        return value.reflect_partial_eq(default) == Some(true);
    }
    member
        .default_value()
        .or_else(|| member.type_info().default_value())
        .is_some_and(|default| value.reflect_partial_eq(&*default) == Some(true))
}
