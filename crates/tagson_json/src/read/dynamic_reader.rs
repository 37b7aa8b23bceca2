use alloc::boxed::Box;
use alloc::string::String;

use serde_json::Value;
use tagson_reflect::Reflect;
use tagson_reflect::info::{TypeInfo, Typed};

use super::ReadContext;
use crate::JsonError;

#[inline]
fn dynamic_info() -> &'static TypeInfo {
    <Box<dyn Reflect>>::type_info()
}

impl ReadContext<'_> {
    /// Reads an untagged value whose type is unknown.
    ///
    /// Scalars take their natural type: `bool`, `i64`, `u64`, `f64` or
    /// `String`. Arrays and objects are read into the list and dictionary
    /// types of the settings.
    pub(super) fn read_dynamic(&mut self, value: &Value) -> Result<Box<dyn Reflect>, JsonError> {
        match value {
            Value::Null => Ok(Box::new(Option::<Box<dyn Reflect>>::None)),
            Value::Bool(value) => Ok(Box::new(*value)),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Ok(Box::new(value))
                } else if let Some(value) = number.as_u64() {
                    Ok(Box::new(value))
                } else {
                    Ok(Box::new(number.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Value::String(value) => Ok(Box::new(String::clone(value))),
            Value::Array(_) => {
                let target = self.settings.list_type;
                self.nested(target, |cx| cx.read_collection(value, target))
            }
            Value::Object(map) => {
                if let Some(inner) = map.get("$value").or_else(|| map.get("$values")) {
                    return self.read_value(inner, dynamic_info());
                }
                let target = self.settings.dictionary_type;
                self.nested(target, |cx| cx.read_map(value, target))
            }
        }
    }
}
