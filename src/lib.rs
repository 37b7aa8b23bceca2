#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use tagson_json as json;
pub use tagson_reflect as reflect;
pub use tagson_utils as utils;

pub use tagson_json::{DeserializeSettings, JsonError, SerializeSettings};
pub use tagson_json::{from_json_str, from_json_value, to_json_string};
pub use tagson_reflect::Reflect;
