use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use serde_json::json;
use tagson_reflect::Reflect;
use tagson_reflect::info::{TypePath, Typed};
use tagson_reflect::registry::TypeRegistry;

use super::parse;
use crate::settings::{TypeNameInfo, TypeOverride, TypeOverrides};
use crate::shape::DefaultDictionary;
use crate::{
    DeserializeSettings, JsonError, SerializeSettings, from_json_str, from_json_value, from_json_value_dyn,
    to_json_string, to_json_string_dyn,
};

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Circle {
    radius: f64,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Square {
    side: f64,
}

/// No default: read through the memberwise constructor.
#[derive(Reflect, Debug)]
struct Canvas {
    shape: Box<dyn Reflect>,
    extra: Box<dyn Reflect>,
}

fn canvas() -> Canvas {
    Canvas {
        shape: Box::new(Circle { radius: 2.0 }),
        extra: Box::new(5_i32),
    }
}

fn read_settings() -> DeserializeSettings {
    let mut registry = TypeRegistry::new();
    registry.register::<Circle>();
    registry.register::<Square>();
    DeserializeSettings::default().with_registry(registry)
}

#[test]
fn derived_value_in_untyped_slot() {
    let text = to_json_string(&canvas(), &SerializeSettings::default()).unwrap();
    assert_eq!(
        parse(&text),
        json!({
            "shape": { "$type": Circle::type_path(), "radius": 2.0 },
            "extra": { "$type": "i32", "$value": 5 },
        })
    );

    let back: Canvas = from_json_str(&text, &read_settings()).unwrap();
    assert_eq!(back.shape.downcast_ref::<Circle>(), Some(&Circle { radius: 2.0 }));
    assert_eq!(back.extra.downcast_ref::<i32>(), Some(&5));
}

#[test]
fn self_describing_scalars_are_untagged() {
    let items: Vec<Box<dyn Reflect>> = vec![
        Box::new(1_i64),
        Box::new("a".to_string()),
        Box::new(true),
        Box::new(Square { side: 1.5 }),
    ];
    let text = to_json_string(&items, &SerializeSettings::default()).unwrap();
    assert_eq!(
        parse(&text),
        json!([1, "a", true, { "$type": Square::type_path(), "side": 1.5 }])
    );

    let back: Vec<Box<dyn Reflect>> = from_json_str(&text, &read_settings()).unwrap();
    assert_eq!(back[0].downcast_ref::<i64>(), Some(&1));
    assert_eq!(back[1].downcast_ref::<String>().map(String::as_str), Some("a"));
    assert_eq!(back[2].downcast_ref::<bool>(), Some(&true));
    assert_eq!(back[3].downcast_ref::<Square>(), Some(&Square { side: 1.5 }));
}

#[test]
fn untyped_documents() {
    let value = json!({ "a": [1, true, "x"], "b": 2.5, "c": null });
    let back = from_json_value_dyn(&value, <Box<dyn Reflect>>::type_info(), &read_settings()).unwrap();

    let dictionary = back.downcast_ref::<DefaultDictionary>().unwrap();
    let list = dictionary["a"].downcast_ref::<Vec<Box<dyn Reflect>>>().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0].downcast_ref::<i64>(), Some(&1));
    assert_eq!(dictionary["b"].downcast_ref::<f64>(), Some(&2.5));
    assert!(dictionary["c"].is::<Option<Box<dyn Reflect>>>());

    // The default dictionary type is never tagged.
    let text = to_json_string_dyn(&*back, None, &SerializeSettings::default()).unwrap();
    assert_eq!(parse(&text), json!({ "a": [1, true, "x"], "b": 2.5, "c": null }));
}

#[test]
fn untyped_objects_skip_codec_keys() {
    let value = json!({ "$id": 4, "$kv": [{ "$k": "k", "$v": 1 }] });
    let back = from_json_value_dyn(&value, <Box<dyn Reflect>>::type_info(), &read_settings()).unwrap();

    let dictionary = back.downcast_ref::<DefaultDictionary>().unwrap();
    let keys: Vec<_> = dictionary.keys().map(String::as_str).collect();
    assert_eq!(keys, ["k"]);
    assert_eq!(dictionary["k"].downcast_ref::<i64>(), Some(&1));
}

#[test]
fn short_names() {
    let settings = SerializeSettings::default().with_type_name_info(TypeNameInfo::Short);
    let text = to_json_string(&canvas(), &settings).unwrap();
    assert_eq!(parse(&text)["shape"]["$type"], json!("Circle"));

    let back: Canvas = from_json_str(&text, &read_settings()).unwrap();
    assert!(back.shape.is::<Circle>());
}

#[test]
fn global_type_table() {
    let settings = SerializeSettings::default().with_global_typing(true);
    let text = to_json_string(&canvas(), &settings).unwrap();
    assert_eq!(
        parse(&text),
        json!({
            "$value": {
                "shape": { "$type": 1, "radius": 2.0 },
                "extra": { "$type": 2, "$value": 5 },
            },
            "$types": { "1": Circle::type_path(), "2": "i32" },
        })
    );

    let back: Canvas = from_json_str(&text, &read_settings()).unwrap();
    assert!(back.shape.is::<Circle>());
    assert_eq!(back.extra.downcast_ref::<i32>(), Some(&5));

    let orphan = json!({ "shape": { "$type": 1, "radius": 2.0 }, "extra": 1 });
    assert!(matches!(
        from_json_value::<Canvas>(&orphan, &read_settings()),
        Err(JsonError::UnknownTypeOrdinal { ordinal: 1 })
    ));
}

#[test]
fn unknown_type_name() {
    let value = json!({ "shape": { "$type": "nowhere::Hexagon" }, "extra": 1 });
    assert!(matches!(
        from_json_value::<Canvas>(&value, &read_settings()),
        Err(JsonError::TypeResolution { name }) if name == "nowhere::Hexagon"
    ));
}

#[test]
fn bind_to_substitutes_the_tagged_type() {
    let overrides = TypeOverrides::new().with::<Circle>(TypeOverride::new().with_bind_to::<Square>());
    let settings = read_settings().with_overrides(overrides);

    let value = json!({ "$type": Circle::type_path(), "side": 3.0 });
    let back = from_json_value_dyn(&value, <Box<dyn Reflect>>::type_info(), &settings).unwrap();
    assert_eq!(back.downcast_ref::<Square>(), Some(&Square { side: 3.0 }));
}

#[test]
fn typed_slot_ignores_matching_tag() {
    let value = json!({ "$type": Circle::type_path(), "radius": 1.0 });
    let back: Circle = from_json_value(&value, &read_settings()).unwrap();
    assert_eq!(back, Circle { radius: 1.0 });
}
