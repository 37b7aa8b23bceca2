use alloc::string::String;

use log::{debug, warn};
use tagson_reflect::Reflect;
use tagson_reflect::info::TypeInfo;
use tagson_reflect::ops::{ReflectRef, SharedHandle};

use super::list_writer::{write_array, write_items, write_tuple};
use super::map_writer::MapWriter;
use super::struct_writer::StructWriter;
use crate::JsonError;
use crate::format::{Output, write_primitive};
use crate::refs::{GlobalTypeTable, ReferenceMap, VisitingStack};
use crate::settings::{SerializeSettings, TypeTagPolicy};
use crate::shape::{PrimitiveKind, TypeShape, classify, resolve_container};

// -----------------------------------------------------------------------------
// Header

/// The `$type` and `$id` entries written ahead of a value.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct Header {
    pub tag: Option<&'static TypeInfo>,
    pub id: Option<u64>,
}

impl Header {
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none()
    }
}

// -----------------------------------------------------------------------------
// WriteContext

/// Per-call state of the write engine.
pub(crate) struct WriteContext<'a> {
    pub(super) settings: &'a SerializeSettings,
    pub(super) out: Output,
    references: ReferenceMap,
    visiting: VisitingStack,
    globals: Option<GlobalTypeTable>,
    depth: usize,
}

/// Writes `value` as a complete JSON document.
///
/// `expected` is the declared type of the root slot; `None` declares an
/// untyped slot.
pub(crate) fn write_root(
    value: &dyn Reflect,
    expected: Option<&'static TypeInfo>,
    settings: &SerializeSettings,
) -> Result<String, JsonError> {
    let mut cx = WriteContext::new(settings);

    if cx.globals.is_some() {
        cx.out.begin_object()?;
        cx.out.key("$value")?;
        cx.write_value(value, expected)?;
        if let Some(globals) = cx.globals.take() {
            cx.out.key("$types")?;
            cx.out.value(&globals.to_value(settings.type_name_info))?;
        }
        cx.out.end_object()?;
    } else {
        cx.write_value(value, expected)?;
    }

    Ok(cx.out.into_string())
}

impl<'a> WriteContext<'a> {
    pub fn new(settings: &'a SerializeSettings) -> Self {
        Self {
            settings,
            out: Output::new(settings.formatting).with_escape_unicode(settings.escape_unicode),
            references: ReferenceMap::new(),
            visiting: VisitingStack::default(),
            globals: settings.global_typing.then(GlobalTypeTable::new),
            depth: 0,
        }
    }

    /// Writes a value into a slot declared as `expected`.
    pub fn write_value(
        &mut self,
        value: &dyn Reflect,
        expected: Option<&'static TypeInfo>,
    ) -> Result<(), JsonError> {
        let expected = expected.filter(|info| !info.is_dynamic());
        match value.reflect_ref() {
            ReflectRef::Option(option) => match option.value() {
                None => self.out.null(),
                Some(inner) => {
                    let expected = expected.map(|info| match info {
                        TypeInfo::Option(option) => option.some_info(),
                        other => other,
                    });
                    self.write_value(inner, expected)
                }
            },
            ReflectRef::Shared(handle) => self.write_shared(handle, expected),
            _ => self.write_content(value, expected, None, None),
        }
    }

    fn write_shared(
        &mut self,
        handle: &dyn SharedHandle,
        expected: Option<&'static TypeInfo>,
    ) -> Result<(), JsonError> {
        let identity = handle.identity();
        let info = handle.reflect_type_info();

        if self.visiting.contains(identity) {
            if self.settings.preserve_references {
                if let Some(id) = self.references.get(identity) {
                    return self.write_ref(id);
                }
            }
            if self.settings.error_on_circular_ref {
                return Err(JsonError::CircularReference {
                    ty: info.type_path(),
                });
            }
            warn!("circular reference on `{}` written as null", info.type_path());
            return self.out.null();
        }

        let mut id = None;
        if self.settings.preserve_references {
            let (assigned, seen) = self.references.id_for(identity);
            if seen {
                return self.write_ref(assigned);
            }
            id = Some(assigned);
        }

        // A slot declared as this handle type reads the content directly.
        // Anywhere else the handle type itself is what a tag must name.
        let (expected, declared) = match expected {
            Some(TypeInfo::Shared(shared)) if shared.type_id() == info.type_id() => {
                (Some(shared.inner_info()), None)
            }
            _ => (None, Some(info)),
        };

        self.visiting.push(identity);
        let guard = handle.read_value();
        let result = self.write_content(&**guard, expected, declared, id);
        drop(guard);
        self.visiting.pop();
        result
    }

    /// Writes a value that is neither `None` nor a handle.
    ///
    /// `declared` overrides the type named by a tag, `id` is the pending
    /// `$id` of an enclosing handle.
    fn write_content(
        &mut self,
        value: &dyn Reflect,
        expected: Option<&'static TypeInfo>,
        declared: Option<&'static TypeInfo>,
        id: Option<u64>,
    ) -> Result<(), JsonError> {
        let expected = expected.filter(|info| !info.is_dynamic());
        let info = value.reflect_type_info();
        let shape = classify(info);
        let tag_info = declared.unwrap_or(info);
        let header = Header {
            tag: self.wants_tag(tag_info, shape, expected).then_some(tag_info),
            id,
        };

        if let Some(kind) = shape.primitive_kind() {
            return self.write_scalar(header, |out| write_primitive(out, kind, value));
        }

        match value.reflect_ref() {
            ReflectRef::Enum(value) => {
                let use_names = self.settings.use_enum_names;
                self.write_scalar(header, |out| {
                    if use_names {
                        out.str(value.variant_name())
                    } else {
                        out.i64(value.discriminant())
                    }
                })
            }
            ReflectRef::Opaque(_) => Err(JsonError::Unsupported {
                ty: info.type_path(),
            }),
            // Nested wrappers, such as `Shared<Option<T>>`, are boxed.
            ReflectRef::Option(_) | ReflectRef::Shared(_) => {
                if header.is_empty() {
                    return self.write_value(value, expected);
                }
                self.out.begin_object()?;
                self.write_header(header)?;
                self.out.key("$value")?;
                self.write_value(value, expected)?;
                self.out.end_object()
            }
            ReflectRef::Struct(value) => {
                if !self.enter(true, info)? {
                    return Ok(());
                }
                StructWriter { value, header }.write(self)?;
                self.leave();
                Ok(())
            }
            ReflectRef::Map(value) => {
                if !self.enter(true, info)? {
                    return Ok(());
                }
                MapWriter { value, header }.write(self)?;
                self.leave();
                Ok(())
            }
            ReflectRef::List(list) => {
                if !self.enter(false, info)? {
                    return Ok(());
                }
                let item_info = item_info_of(info);
                write_items(self, header, list.iter(), item_info)?;
                self.leave();
                Ok(())
            }
            ReflectRef::Set(set) => {
                if !self.enter(false, info)? {
                    return Ok(());
                }
                let item_info = item_info_of(info);
                write_items(self, header, set.iter(), item_info)?;
                self.leave();
                Ok(())
            }
            ReflectRef::Array(array) => {
                if !self.enter(false, info)? {
                    return Ok(());
                }
                write_array(self, header, array, item_info_of(info))?;
                self.leave();
                Ok(())
            }
            ReflectRef::Tuple(tuple) => {
                if !self.enter(false, info)? {
                    return Ok(());
                }
                write_tuple(self, header, tuple)?;
                self.leave();
                Ok(())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Tags

    fn wants_tag(
        &self,
        info: &'static TypeInfo,
        shape: &TypeShape,
        expected: Option<&'static TypeInfo>,
    ) -> bool {
        // A handle in an untyped slot is tagged even around a string, so
        // that it reads back as a handle.
        let kind = match info {
            TypeInfo::Shared(_) => None,
            _ => shape.primitive_kind(),
        };
        if matches!(kind, Some(PrimitiveKind::String | PrimitiveKind::Bool)) {
            return false;
        }

        let policy = self.settings.type_tags;
        let always = match policy {
            TypeTagPolicy::None => return false,
            TypeTagPolicy::Auto => false,
            TypeTagPolicy::Objects => shape.is_object(),
            TypeTagPolicy::Arrays => shape.is_collection(),
            TypeTagPolicy::All => shape.is_object() || shape.is_collection(),
        };
        if always {
            return true;
        }

        let differs = expected.is_none_or(|expected| expected.type_id() != info.type_id());
        if !differs {
            return false;
        }
        if policy != TypeTagPolicy::Auto {
            return true;
        }
        match kind {
            Some(kind) => !kind.is_self_describing(),
            None => !self.settings.tag_suppressed.contains(&info.type_id()),
        }
    }

    fn write_tag(&mut self, info: &'static TypeInfo) -> Result<(), JsonError> {
        match &mut self.globals {
            Some(globals) => {
                let ordinal = globals.register(info);
                self.out.u64(ordinal)
            }
            None => self.out.str(self.settings.type_name_info.name_of(info)),
        }
    }

    pub(super) fn write_header(&mut self, header: Header) -> Result<(), JsonError> {
        if let Some(info) = header.tag {
            self.out.key("$type")?;
            self.write_tag(info)?;
        }
        if let Some(id) = header.id {
            self.out.key("$id")?;
            self.out.u64(id)?;
        }
        Ok(())
    }

    fn write_ref(&mut self, id: u64) -> Result<(), JsonError> {
        self.out.begin_object()?;
        self.out.key("$ref")?;
        self.out.u64(id)?;
        self.out.end_object()
    }

    /// Writes a scalar inline, or boxed under `$value` when it has a header.
    fn write_scalar(
        &mut self,
        header: Header,
        write: impl FnOnce(&mut Output) -> Result<(), JsonError>,
    ) -> Result<(), JsonError> {
        if header.is_empty() {
            return write(&mut self.out);
        }
        self.out.begin_object()?;
        self.write_header(header)?;
        self.out.key("$value")?;
        write(&mut self.out)?;
        self.out.end_object()
    }

    /// Opens a collection: a bare array, or `$values` under a header.
    pub(super) fn begin_collection(&mut self, header: Header) -> Result<(), JsonError> {
        if !header.is_empty() {
            self.out.begin_object()?;
            self.write_header(header)?;
            self.out.key("$values")?;
        }
        self.out.begin_array()
    }

    pub(super) fn end_collection(&mut self, header: Header) -> Result<(), JsonError> {
        self.out.end_array()?;
        if !header.is_empty() {
            self.out.end_object()?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Depth

    /// Enters an object or collection.
    ///
    /// Returns `false` when the branch was truncated instead.
    fn enter(&mut self, object: bool, info: &TypeInfo) -> Result<bool, JsonError> {
        let max = self.settings.max_depth;
        if max != 0 && self.depth >= max {
            if self.settings.error_on_max_depth {
                return Err(JsonError::MaxDepthExceeded { depth: max });
            }
            debug!("depth limit {max} reached at `{}`, branch truncated", info.type_path());
            if object {
                self.out.begin_object()?;
                self.out.end_object()?;
            } else {
                self.out.begin_array()?;
                self.out.end_array()?;
            }
            return Ok(false);
        }
        self.depth += 1;
        Ok(true)
    }

    #[inline]
    fn leave(&mut self) {
        self.depth -= 1;
    }
}

/// The declared item type of a list, set or array type.
fn item_info_of(info: &'static TypeInfo) -> Option<&'static TypeInfo> {
    match resolve_container(info).concrete {
        TypeInfo::List(list) => Some(list.item_info()),
        TypeInfo::Set(set) => Some(set.item_info()),
        TypeInfo::Array(array) => Some(array.item_info()),
        _ => None,
    }
}
