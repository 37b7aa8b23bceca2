use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::TypeId;

use serde_json::{Map, Value};
use tagson_reflect::info::TypeInfo;
use tagson_utils::hash::HashMap;

use crate::JsonError;
use crate::names::TypeNameResolver;
use crate::settings::TypeNameInfo;

// -----------------------------------------------------------------------------
// GlobalTypeTable

/// Write-side ordinal assignment for `$type` tags under global typing.
///
/// Ordinals start at 1 and follow first use. The table is emitted once,
/// as the `$types` sibling of the root `$value`.
#[derive(Debug, Default)]
pub struct GlobalTypeTable {
    types: Vec<&'static TypeInfo>,
    ordinals: HashMap<TypeId, u64>,
}

impl GlobalTypeTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, info: &'static TypeInfo) -> u64 {
        *self.ordinals.entry(info.type_id()).or_insert_with(|| {
            self.types.push(info);
            self.types.len() as u64
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Builds the `$types` object.
    pub fn to_value(&self, names: TypeNameInfo) -> Value {
        let table = self
            .types
            .iter()
            .enumerate()
            .map(|(index, info)| ((index + 1).to_string(), Value::from(names.name_of(info))))
            .collect::<Map<String, Value>>();
        Value::Object(table)
    }
}

// -----------------------------------------------------------------------------
// GlobalTypeTableReader

/// Read-side ordinal lookup, parsed from `$types` before the root value.
#[derive(Debug, Default)]
pub struct GlobalTypeTableReader {
    types: HashMap<u64, &'static TypeInfo>,
}

impl GlobalTypeTableReader {
    /// Parses a `$types` object.
    pub fn parse(table: &Map<String, Value>, resolver: &dyn TypeNameResolver) -> Result<Self, JsonError> {
        let mut types = HashMap::default();
        for (key, name) in table {
            let ordinal = key
                .parse::<u64>()
                .map_err(|_| JsonError::mismatch("type ordinal", key.as_str()))?;
            let Value::String(name) = name else {
                return Err(JsonError::mismatch("type name", name.to_string()));
            };
            let info = resolver
                .resolve(name)
                .ok_or_else(|| JsonError::TypeResolution { name: name.clone() })?;
            types.insert(ordinal, info);
        }
        Ok(Self { types })
    }

    pub fn resolve(&self, ordinal: u64) -> Result<&'static TypeInfo, JsonError> {
        self.types
            .get(&ordinal)
            .copied()
            .ok_or(JsonError::UnknownTypeOrdinal { ordinal })
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use serde_json::json;
    use tagson_reflect::info::Typed;

    use super::{GlobalTypeTable, GlobalTypeTableReader};
    use crate::JsonError;
    use crate::names::default_registry;
    use crate::settings::TypeNameInfo;

    #[test]
    fn ordinals_follow_first_use() {
        let mut table = GlobalTypeTable::new();
        assert_eq!(table.register(u8::type_info()), 1);
        assert_eq!(table.register(String::type_info()), 2);
        assert_eq!(table.register(u8::type_info()), 1);
        assert_eq!(
            table.to_value(TypeNameInfo::Full),
            json!({"1": "u8", "2": "alloc::string::String"}),
        );
    }

    #[test]
    fn reader_resolves_names() {
        let value = json!({"1": "u8", "2": "String"});
        let reader = GlobalTypeTableReader::parse(value.as_object().unwrap(), default_registry()).unwrap();
        assert!(reader.resolve(2).unwrap().type_is::<String>());
        assert!(matches!(
            reader.resolve(3),
            Err(JsonError::UnknownTypeOrdinal { ordinal: 3 })
        ));

        let bad = json!({"1": "no::such::Type"});
        assert!(matches!(
            GlobalTypeTableReader::parse(bad.as_object().unwrap(), default_registry()),
            Err(JsonError::TypeResolution { .. })
        ));
    }
}
