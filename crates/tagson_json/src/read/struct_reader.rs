use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use log::debug;
use serde_json::{Map, Value};
use tagson_reflect::Reflect;
use tagson_reflect::info::{StructInfo, TupleInfo, TypeInfo};
use tagson_reflect::ops::Struct;

use super::ReadContext;
use crate::JsonError;
use crate::format::describe;
use crate::settings::TypeOverride;
use crate::shape::{MemberDescriptor, members_of};

impl ReadContext<'_> {
    /// Reads an object into a struct.
    ///
    /// Types with a default (or an activator result) are instantiated and
    /// populated member by member. Other types go through their constructor.
    pub(super) fn read_struct(
        &mut self,
        value: &Value,
        target: &'static TypeInfo,
        info: &'static StructInfo,
    ) -> Result<Box<dyn Reflect>, JsonError> {
        let Value::Object(map) = value else {
            return Err(JsonError::mismatch(info.type_path(), describe(value)));
        };

        match self.instantiate(target, map)? {
            Some(mut instance) => {
                let object = instance
                    .reflect_mut()
                    .as_struct()
                    .map_err(|_| JsonError::mismatch(info.type_path(), "a non-struct instance"))?;
                self.populate(object, map, info)?;
                Ok(instance)
            }
            None => self.construct(map, info),
        }
    }

    /// Reads every member present in `map` into an existing struct.
    pub(super) fn populate(
        &mut self,
        object: &mut dyn Struct,
        map: &Map<String, Value>,
        info: &'static StructInfo,
    ) -> Result<(), JsonError> {
        let over = self.settings.overrides.get(info.type_id());

        for (key, value) in map {
            if key.starts_with('$') {
                continue;
            }
            let Some(member) = self.member_for(info, over, key) else {
                self.unknown_member(info, key)?;
                continue;
            };
            if over.is_some_and(|over| over.is_ignored(member.name())) {
                continue;
            }

            let field = self.read_value(value, member.type_info())?;
            member.set(object, field).map_err(|field| {
                JsonError::mismatch(member.type_info().type_path(), field.reflect_type_path())
            })?;
        }
        Ok(())
    }

    /// Builds a struct through its constructor, one argument per member.
    fn construct(
        &mut self,
        map: &Map<String, Value>,
        info: &'static StructInfo,
    ) -> Result<Box<dyn Reflect>, JsonError> {
        let over = self.settings.overrides.get(info.type_id());
        let matcher = self.settings.ctor_param_matcher;
        let table = members_of(info, self.settings.case_sensitive);

        let mut args = Vec::with_capacity(table.len());
        for member in table.iter() {
            let ignored = over.is_some_and(|over| over.is_ignored(member.name()));
            let input = if ignored {
                None
            } else {
                over.and_then(|over| over.alias_of(member.name()))
                    .and_then(|alias| matcher(alias, map))
                    .or_else(|| matcher(member.name(), map))
                    .or_else(|| member.alias().and_then(|alias| matcher(alias, map)))
            };

            let arg = match input {
                Some(input) => self.read_value(input, member.type_info())?,
                None => member
                    .default_value()
                    .or_else(|| member.type_info().default_value())
                    .ok_or_else(|| JsonError::ConstructorBinding {
                        ty: info.type_path(),
                        reason: alloc::format!("no input for parameter `{}`", member.name()),
                    })?,
            };
            args.push(arg);
        }

        if self.settings.error_on_missing_member {
            for key in map.keys().filter(|key| !key.starts_with('$')) {
                if self.member_for(info, over, key).is_none() {
                    self.unknown_member(info, key)?;
                }
            }
        }

        info.construct(args).map_err(|err| JsonError::ConstructorBinding {
            ty: info.type_path(),
            reason: err.to_string(),
        })
    }

    fn member_for(
        &self,
        info: &'static StructInfo,
        over: Option<&TypeOverride>,
        key: &str,
    ) -> Option<&'static MemberDescriptor> {
        let case_sensitive = self.settings.case_sensitive;
        let table = members_of(info, case_sensitive);
        over.and_then(|over| over.member_of(key, case_sensitive))
            .and_then(|name| table.find(name))
            .or_else(|| table.find(key))
    }

    fn unknown_member(&self, info: &'static StructInfo, key: &str) -> Result<(), JsonError> {
        if self.settings.error_on_missing_member {
            return Err(JsonError::MissingMember {
                ty: info.type_path(),
                key: key.to_string(),
            });
        }
        debug!("no member of `{}` matches key `{key}`, skipped", info.type_path());
        Ok(())
    }

    /// Reads an array into a tuple. Anonymous values may be skipped, in which
    /// case every element takes its default.
    pub(super) fn read_tuple(
        &mut self,
        value: &Value,
        info: &'static TupleInfo,
    ) -> Result<Box<dyn Reflect>, JsonError> {
        let args = if self.settings.ignore_anonymous_types {
            info.fields()
                .iter()
                .map(|field| {
                    field
                        .default_value()
                        .or_else(|| field.type_info().default_value())
                        .ok_or_else(|| JsonError::ConstructorBinding {
                            ty: info.type_path(),
                            reason: alloc::format!("element `{}` has no default", field.name()),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?
        } else {
            let Value::Array(items) = value else {
                return Err(JsonError::mismatch(info.type_path(), describe(value)));
            };
            if items.len() != info.field_len() {
                return Err(JsonError::mismatch(
                    info.type_path(),
                    alloc::format!("an array of {} elements", items.len()),
                ));
            }
            items
                .iter()
                .zip(info.fields())
                .map(|(item, field)| self.read_value(item, field.type_info()))
                .collect::<Result<Vec<_>, _>>()?
        };

        info.construct(args).map_err(|err| JsonError::ConstructorBinding {
            ty: info.type_path(),
            reason: err.to_string(),
        })
    }
}
