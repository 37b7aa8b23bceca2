use alloc::boxed::Box;

use log::debug;
use serde_json::{Map, Value};
use tagson_reflect::Reflect;
use tagson_reflect::info::{EnumInfo, SharedInfo, TypeInfo};

use crate::JsonError;
use crate::format::{describe, read_primitive};
use crate::refs::{GlobalTypeTableReader, ReferenceTable};
use crate::settings::DeserializeSettings;
use crate::shape::{classify, resolve_container};

// -----------------------------------------------------------------------------
// ReadContext

/// Per-call state of the read engine.
pub(crate) struct ReadContext<'a> {
    pub(super) settings: &'a DeserializeSettings,
    pub(super) references: ReferenceTable,
    globals: Option<GlobalTypeTableReader>,
    depth: usize,
}

/// Reads a complete document into a value of `target`.
///
/// A root object holding `$types` is a globally typed document: the table
/// is parsed first and `$value` is the payload.
pub(crate) fn read_root(
    value: &Value,
    target: &'static TypeInfo,
    settings: &DeserializeSettings,
) -> Result<Box<dyn Reflect>, JsonError> {
    let mut cx = ReadContext::new(settings);

    if let Value::Object(map) = value {
        if let Some(Value::Object(types)) = map.get("$types") {
            cx.globals = Some(GlobalTypeTableReader::parse(types, &*settings.type_names)?);
            let payload = map.get("$value").unwrap_or(&Value::Null);
            return cx.read_value(payload, target);
        }
    }

    cx.read_value(value, target)
}

impl<'a> ReadContext<'a> {
    pub fn new(settings: &'a DeserializeSettings) -> Self {
        Self {
            settings,
            references: ReferenceTable::new(),
            globals: None,
            depth: 0,
        }
    }

    /// Reads `value` into a slot of type `target`.
    pub fn read_value(
        &mut self,
        value: &Value,
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, JsonError> {
        if let Value::Object(map) = value {
            if let Some(id) = map.get("$ref") {
                let id = id
                    .as_u64()
                    .ok_or_else(|| JsonError::mismatch("reference id", describe(id)))?;
                let handle = self
                    .references
                    .resolve(id)
                    .ok_or(JsonError::UnknownReference { id })?;
                return self.adapt(handle, target);
            }

            if let Some(tag) = map.get("$type") {
                let resolved = self.bind(self.resolve_tag(tag)?);
                if resolved.type_id() != target.type_id() {
                    let value = self.read_typed(value, resolved)?;
                    return self.adapt(value, target);
                }
            }
        }

        let bound = self.bind(target);
        if bound.type_id() != target.type_id() {
            let value = self.read_typed(value, bound)?;
            return self.adapt(value, target);
        }
        self.read_typed(value, target)
    }

    /// Reads `value` as exactly `target`, ignoring any `$type` tag.
    fn read_typed(
        &mut self,
        value: &Value,
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, JsonError> {
        if value.is_null() {
            return self.read_null(target);
        }

        match target {
            TypeInfo::Option(info) => {
                let inner = self.read_value(value, info.some_info())?;
                return info
                    .wrap(inner)
                    .map_err(|inner| JsonError::mismatch(target.type_path(), inner.reflect_type_path()));
            }
            TypeInfo::Shared(info) => return self.read_shared(value, info),
            TypeInfo::ReadOnly(info) => {
                let inner = self.read_value(value, info.inner_info())?;
                return info
                    .wrap(inner)
                    .map_err(|inner| JsonError::mismatch(target.type_path(), inner.reflect_type_path()));
            }
            TypeInfo::Dynamic(_) => return self.read_dynamic(value),
            _ => {}
        }

        if let Value::Object(map) = value {
            if let Some(inner) = map.get("$value").or_else(|| map.get("$values")) {
                return self.read_value(inner, target);
            }
        }

        if let Some(kind) = classify(target).primitive_kind() {
            return read_primitive(kind, target, value);
        }

        match target {
            TypeInfo::Enum(info) => read_enum(info, value),
            TypeInfo::Struct(info) => self.nested(target, |cx| cx.read_struct(value, target, info)),
            TypeInfo::Tuple(info) => self.nested(target, |cx| cx.read_tuple(value, info)),
            TypeInfo::List(_) | TypeInfo::Set(_) | TypeInfo::Array(_) => {
                self.nested(target, |cx| cx.read_collection(value, target))
            }
            TypeInfo::Map(_) => self.nested(target, |cx| cx.read_map(value, target)),
            _ => Err(JsonError::Unsupported {
                ty: target.type_path(),
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Types

    fn resolve_tag(&self, tag: &Value) -> Result<&'static TypeInfo, JsonError> {
        match tag {
            Value::String(name) => self
                .settings
                .type_names
                .resolve(name)
                .ok_or_else(|| JsonError::TypeResolution { name: name.clone() }),
            Value::Number(number) => {
                let ordinal = number
                    .as_u64()
                    .ok_or_else(|| JsonError::mismatch("type ordinal", describe(tag)))?;
                match &self.globals {
                    Some(globals) => globals.resolve(ordinal),
                    None => Err(JsonError::UnknownTypeOrdinal { ordinal }),
                }
            }
            _ => Err(JsonError::mismatch("type tag", describe(tag))),
        }
    }

    /// Applies the `bind_to` override of a type.
    fn bind(&self, info: &'static TypeInfo) -> &'static TypeInfo {
        self.settings
            .overrides
            .get(info.type_id())
            .and_then(|over| over.bind_to())
            .unwrap_or(info)
    }

    /// Fits a value read as another type into a `target` slot, wrapping it
    /// into `Option`, `Shared` or read-only views as needed.
    pub(super) fn adapt(
        &self,
        value: Box<dyn Reflect>,
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, JsonError> {
        if target.is_dynamic() || value.ty_id() == target.type_id() {
            return Ok(value);
        }
        let wrapped = match target {
            TypeInfo::Option(info) => info.wrap(self.adapt(value, info.some_info())?),
            TypeInfo::Shared(info) => info.wrap(self.adapt(value, info.inner_info())?),
            TypeInfo::ReadOnly(info) => info.wrap(self.adapt(value, info.inner_info())?),
            _ => Err(value),
        };
        wrapped.map_err(|value| JsonError::mismatch(target.type_path(), value.reflect_type_path()))
    }

    // -------------------------------------------------------------------------
    // Null, handles

    fn read_null(&self, target: &'static TypeInfo) -> Result<Box<dyn Reflect>, JsonError> {
        match target {
            TypeInfo::Dynamic(_) => Ok(Box::new(Option::<Box<dyn Reflect>>::None)),
            _ => target
                .default_value()
                .ok_or_else(|| JsonError::mismatch(target.type_path(), "null")),
        }
    }

    fn read_shared(
        &mut self,
        value: &Value,
        info: &'static SharedInfo,
    ) -> Result<Box<dyn Reflect>, JsonError> {
        let id = match value {
            Value::Object(map) => map
                .get("$id")
                .map(|id| id.as_u64().ok_or_else(|| JsonError::mismatch("reference id", describe(id))))
                .transpose()?,
            _ => None,
        };
        let wrap = |inner: Box<dyn Reflect>| {
            info.wrap(inner)
                .map_err(|inner| JsonError::mismatch(info.type_path(), inner.reflect_type_path()))
        };

        let Some(id) = id else {
            return wrap(self.read_value(value, info.inner_info())?);
        };

        // Structs with a default and plain collections are registered while
        // still empty, so their content may refer back to them.
        if let Value::Object(map) = value {
            let inner = info.inner_info();
            if let Some(instance) = self.empty_instance(inner, map)? {
                let handle = wrap(instance)?;
                self.references.insert(id, &*handle);
                if self.descend(inner)? {
                    let result = self.populate_handle(&*handle, map, inner);
                    self.depth -= 1;
                    result?;
                }
                return Ok(handle);
            }
        }

        let handle = wrap(self.read_value(value, info.inner_info())?)?;
        self.references.insert(id, &*handle);
        Ok(handle)
    }

    /// An instance of `target` that can be registered before it is read.
    fn empty_instance(
        &self,
        target: &'static TypeInfo,
        map: &Map<String, Value>,
    ) -> Result<Option<Box<dyn Reflect>>, JsonError> {
        match target {
            TypeInfo::Struct(_) => self.instantiate(target, map),
            TypeInfo::List(_) | TypeInfo::Set(_) | TypeInfo::Map(_) => {
                Ok(resolve_container(target).with_capacity(0))
            }
            _ => Ok(None),
        }
    }

    /// Reads the content of a registered handle under its write lock.
    fn populate_handle(
        &mut self,
        handle: &dyn Reflect,
        map: &Map<String, Value>,
        target: &'static TypeInfo,
    ) -> Result<(), JsonError> {
        let shared = handle
            .reflect_ref()
            .as_shared()
            .map_err(|_| JsonError::mismatch(target.type_path(), handle.reflect_type_path()))?;
        let mut guard = shared.write_value();
        let content: &mut dyn Reflect = &mut **guard;

        match target {
            TypeInfo::Struct(info) => {
                let object = content
                    .reflect_mut()
                    .as_struct()
                    .map_err(|_| JsonError::mismatch(info.type_path(), "a non-struct instance"))?;
                self.populate(object, map, info)
            }
            TypeInfo::Map(_) => self.fill_map(content, map),
            _ => match map.get("$values").or_else(|| map.get("$value")) {
                Some(Value::Array(items)) => self.fill_items(content, items),
                Some(Value::Null) | None => Ok(()),
                Some(other) => Err(JsonError::mismatch(target.type_path(), describe(other))),
            },
        }
    }

    /// Builds an empty instance through the activator or the type default.
    pub(super) fn instantiate(
        &self,
        target: &'static TypeInfo,
        map: &Map<String, Value>,
    ) -> Result<Option<Box<dyn Reflect>>, JsonError> {
        let instance = match &self.settings.activator {
            Some(activator) => activator(target, Some(map)),
            None => None,
        };
        match instance {
            Some(instance) if instance.ty_id() != target.type_id() => Err(JsonError::mismatch(
                target.type_path(),
                instance.reflect_type_path(),
            )),
            Some(instance) => Ok(Some(instance)),
            None => Ok(target.default_value()),
        }
    }

    // -------------------------------------------------------------------------
    // Depth

    /// Reads an object or collection one level deeper.
    ///
    /// Past the depth limit the branch reads as the target default.
    pub(super) fn nested(
        &mut self,
        target: &'static TypeInfo,
        read: impl FnOnce(&mut Self) -> Result<Box<dyn Reflect>, JsonError>,
    ) -> Result<Box<dyn Reflect>, JsonError> {
        if !self.descend(target)? {
            return self.read_null(target);
        }
        let result = read(self);
        self.depth -= 1;
        result
    }

    /// Enters one level, or returns `false` when the branch is truncated.
    fn descend(&mut self, target: &'static TypeInfo) -> Result<bool, JsonError> {
        let max = self.settings.max_depth;
        if max != 0 && self.depth >= max {
            if self.settings.error_on_max_depth {
                return Err(JsonError::MaxDepthExceeded { depth: max });
            }
            debug!("depth limit {max} reached at `{}`, branch truncated", target.type_path());
            return Ok(false);
        }
        self.depth += 1;
        Ok(true)
    }
}

// -----------------------------------------------------------------------------
// Enums

/// Accepts a variant name, in any case, or a discriminant as number or text.
fn read_enum(info: &'static EnumInfo, value: &Value) -> Result<Box<dyn Reflect>, JsonError> {
    let index = match value {
        Value::String(name) => info
            .index_of(name)
            .or_else(|| info.index_of_ignore_case(name))
            .or_else(|| {
                let discriminant = name.trim().parse::<i64>().ok()?;
                info.index_of_discriminant(discriminant)
            }),
        Value::Number(number) => number
            .as_i64()
            .and_then(|discriminant| info.index_of_discriminant(discriminant)),
        _ => None,
    };
    index
        .and_then(|index| info.build(index))
        .ok_or_else(|| JsonError::mismatch(info.type_path(), describe(value)))
}
