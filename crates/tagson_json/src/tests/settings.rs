use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use serde_json::{Map, Value, json};
use tagson_reflect::Reflect;
use tagson_reflect::info::{TypePath, Typed};

use super::parse;
use crate::settings::{Formatting, TypeOverride, TypeOverrides, TypeTagPolicy};
use crate::{DeserializeSettings, JsonError, SerializeSettings, from_json_value, to_json_string};

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Record {
    zeta: u8,
    alpha: Option<String>,
    items: Vec<u16>,
    #[reflect(read_only)]
    revision: u32,
}

/// Built through its constructor.
#[derive(Reflect, Debug, PartialEq)]
struct Person {
    name: String,
    #[reflect(default = default_age)]
    age: u32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Contact {
    #[reflect(alias = "FullName")]
    full_name: String,
    scores: BTreeMap<String, u8>,
}

fn default_age() -> u32 {
    18
}

#[test]
fn indented_output() {
    let settings = SerializeSettings::default().with_formatting(Formatting::Spaces(2));
    let text = to_json_string(&Point { x: 1, y: 2 }, &settings).unwrap();
    assert_eq!(text, "{\n  \"x\": 1,\n  \"y\": 2\n}");
}

#[test]
fn ignore_flags() {
    let value = Record {
        zeta: 0,
        alpha: None,
        items: Vec::new(),
        revision: 3,
    };

    let settings = SerializeSettings::default().with_ignore_null_values(true);
    let tree = parse(&to_json_string(&value, &settings).unwrap());
    assert_eq!(tree, json!({ "zeta": 0, "items": [], "revision": 3 }));

    let settings = SerializeSettings::default().with_ignore_empty_collections(true);
    let tree = parse(&to_json_string(&value, &settings).unwrap());
    assert_eq!(tree, json!({ "zeta": 0, "alpha": null, "revision": 3 }));

    let settings = SerializeSettings::default().with_ignore_default_values(true);
    let tree = parse(&to_json_string(&value, &settings).unwrap());
    assert_eq!(tree, json!({ "revision": 3 }));

    let settings = SerializeSettings::default().with_ignore_read_only(true);
    let tree = parse(&to_json_string(&value, &settings).unwrap());
    assert_eq!(tree, json!({ "zeta": 0, "alpha": null, "items": [] }));

    let settings = SerializeSettings::default().with_ignore_null_list_items(true);
    let text = to_json_string(&vec![Some(1_u8), None, Some(2)], &settings).unwrap();
    assert_eq!(text, "[1,2]");
}

#[test]
fn read_only_members_are_populated() {
    let back: Record = from_json_value(&json!({ "revision": 9 }), &DeserializeSettings::default()).unwrap();
    assert_eq!(back.revision, 9);
}

#[test]
fn ordered_keys() {
    let settings = SerializeSettings::default().with_order_keys(true);
    let text = to_json_string(&Record::default(), &settings).unwrap();
    assert_eq!(text, r#"{"alpha":null,"items":[],"revision":0,"zeta":0}"#);
}

#[test]
fn member_overrides() {
    let overrides = || {
        TypeOverrides::new().with::<Point>(TypeOverride::new().with_alias("x", "Horizontal").with_ignored("y"))
    };

    let settings = SerializeSettings::default().with_overrides(overrides());
    let text = to_json_string(&Point { x: 1, y: 2 }, &settings).unwrap();
    assert_eq!(text, r#"{"Horizontal":1}"#);

    let settings = DeserializeSettings::default().with_overrides(overrides());
    let back: Point = from_json_value(&json!({ "horizontal": 7, "y": 9 }), &settings).unwrap();
    assert_eq!(back, Point { x: 7, y: 0 });
}

#[test]
fn override_default_is_skipped() {
    let overrides = TypeOverrides::new().with::<Point>(TypeOverride::new().with_default_value("y", 5_i32));
    let settings = SerializeSettings::default()
        .with_ignore_default_values(true)
        .with_overrides(overrides);
    let text = to_json_string(&Point { x: 3, y: 5 }, &settings).unwrap();
    assert_eq!(text, r#"{"x":3}"#);
}

#[test]
fn key_case_matching() {
    let input = json!({ "X": 1, "Y": 2 });

    let back: Point = from_json_value(&input, &DeserializeSettings::default()).unwrap();
    assert_eq!(back, Point { x: 1, y: 2 });

    let exact = DeserializeSettings::default().with_case_sensitive(true);
    let back: Point = from_json_value(&input, &exact).unwrap();
    assert_eq!(back, Point::default());

    let strict = exact.with_error_on_missing_member(true);
    assert!(matches!(
        from_json_value::<Point>(&input, &strict),
        Err(JsonError::MissingMember { key, .. }) if key == "X"
    ));
}

#[test]
fn depth_limit() {
    let value = vec![vec![vec![1_i32]]];

    let strict = SerializeSettings::default().with_max_depth(2);
    assert!(matches!(
        to_json_string(&value, &strict),
        Err(JsonError::MaxDepthExceeded { depth: 2 })
    ));

    let lenient = strict.with_error_on_max_depth(false);
    assert_eq!(to_json_string(&value, &lenient).unwrap(), "[[[]]]");

    let unlimited = SerializeSettings::default().with_max_depth(0);
    assert_eq!(to_json_string(&value, &unlimited).unwrap(), "[[[1]]]");

    let input = json!([[[1]]]);
    let strict = DeserializeSettings::default().with_max_depth(2);
    assert!(matches!(
        from_json_value::<Vec<Vec<Vec<i32>>>>(&input, &strict),
        Err(JsonError::MaxDepthExceeded { depth: 2 })
    ));

    let lenient = strict.with_error_on_max_depth(false);
    let back: Vec<Vec<Vec<i32>>> = from_json_value(&input, &lenient).unwrap();
    assert_eq!(back, vec![vec![Vec::<i32>::new()]]);
}

#[test]
fn anonymous_values_can_be_ignored() {
    let input = json!([4, "four"]);
    let back: (u8, String) = from_json_value(&input, &DeserializeSettings::default()).unwrap();
    assert_eq!(back, (4, "four".to_string()));

    let settings = DeserializeSettings::default().with_ignore_anonymous_types(true);
    let back: (u8, String) = from_json_value(&input, &settings).unwrap();
    assert_eq!(back, (0, String::new()));
}

#[test]
fn constructor_parameters() {
    let settings = DeserializeSettings::default();
    let back: Person = from_json_value(&json!({ "NAME": "Ann" }), &settings).unwrap();
    assert_eq!(
        back,
        Person {
            name: "Ann".to_string(),
            age: 18
        }
    );

    fn exact<'a>(name: &str, input: &'a Map<String, Value>) -> Option<&'a Value> {
        input.get(name)
    }
    let settings = DeserializeSettings::default().with_ctor_param_matcher(exact);
    let back: Person = from_json_value(&json!({ "NAME": "Ann", "age": 40 }), &settings).unwrap();
    assert_eq!(
        back,
        Person {
            name: String::new(),
            age: 40
        }
    );
}

#[test]
fn activator_supplies_instances() {
    let settings = DeserializeSettings::default().with_activator(|info, _| {
        info.type_is::<Point>()
            .then(|| Box::new(Point { x: 100, y: 0 }) as Box<dyn Reflect>)
    });
    let back: Point = from_json_value(&json!({ "y": 1 }), &settings).unwrap();
    assert_eq!(back, Point { x: 100, y: 1 });

    let wrong = DeserializeSettings::default()
        .with_activator(|_, _| Some(Box::new(1_u8) as Box<dyn Reflect>));
    assert!(matches!(
        from_json_value::<Point>(&json!({}), &wrong),
        Err(JsonError::TypeMismatch { .. })
    ));
}

#[test]
fn pair_form_for_every_map() {
    let value = BTreeMap::from([("a".to_string(), 1_u8)]);
    let settings = SerializeSettings::default().with_use_kv_model_for_maps(true);
    let text = to_json_string(&value, &settings).unwrap();
    assert_eq!(parse(&text), json!({ "$kv": [{ "$k": "a", "$v": 1 }] }));

    let back: BTreeMap<String, u8> = from_json_value(&parse(&text), &DeserializeSettings::default()).unwrap();
    assert_eq!(back, value);
}

#[test]
fn tag_policies() {
    let all = SerializeSettings::default().with_type_tags(TypeTagPolicy::All);
    let tree = parse(&to_json_string(&Point { x: 1, y: 2 }, &all).unwrap());
    assert_eq!(tree, json!({ "$type": Point::type_path(), "x": 1, "y": 2 }));

    let tree = parse(&to_json_string(&vec![1_u16], &all).unwrap());
    assert_eq!(tree, json!({ "$type": <Vec<u16>>::type_path(), "$values": [1] }));

    let arrays = SerializeSettings::default().with_type_tags(TypeTagPolicy::Arrays);
    let text = to_json_string(&Point { x: 1, y: 2 }, &arrays).unwrap();
    assert_eq!(text, r#"{"x":1,"y":2}"#);

    let none = SerializeSettings::default().with_type_tags(TypeTagPolicy::None);
    let boxed: Vec<Box<dyn Reflect>> = vec![Box::new(3_u8)];
    assert_eq!(to_json_string(&boxed, &none).unwrap(), "[3]");

    let auto = SerializeSettings::default();
    let tree = parse(&to_json_string(&boxed, &auto).unwrap());
    assert_eq!(tree, json!([{ "$type": "u8", "$value": 3 }]));
}

#[test]
fn lower_cased_keys() {
    let value = Contact {
        full_name: "Ann".to_string(),
        scores: BTreeMap::from([("Math".to_string(), 9)]),
    };
    let text = to_json_string(&value, &SerializeSettings::default()).unwrap();
    assert_eq!(text, r#"{"FullName":"Ann","scores":{"Math":9}}"#);

    let lower = SerializeSettings::default().with_case_sensitive(false);
    let text = to_json_string(&value, &lower).unwrap();
    assert_eq!(text, r#"{"fullname":"Ann","scores":{"math":9}}"#);

    let back: Contact = from_json_value(&parse(&text), &DeserializeSettings::default()).unwrap();
    assert_eq!(back.full_name, "Ann");
    assert_eq!(back.scores, BTreeMap::from([("math".to_string(), 9)]));
}

#[test]
fn escaped_unicode_output() {
    let value = String::from("café");
    assert_eq!(to_json_string(&value, &SerializeSettings::default()).unwrap(), "\"café\"");

    let settings = SerializeSettings::default().with_escape_unicode(true);
    let text = to_json_string(&value, &settings).unwrap();
    assert_eq!(text, r#""caf\u00e9""#);

    let back: String = from_json_value(&parse(&text), &DeserializeSettings::default()).unwrap();
    assert_eq!(back, "café");
}

#[test]
fn untyped_container_types() {
    type Dictionary = BTreeMap<String, Box<dyn Reflect>>;
    type Items = VecDeque<Box<dyn Reflect>>;

    let settings = DeserializeSettings::default()
        .with_dictionary_type::<Dictionary>()
        .with_list_type::<Items>();
    let input = json!({ "b": [1, "x"], "a": { "$kv": [{ "$k": "k", "$v": true }] } });
    let back = crate::from_json_value_dyn(&input, <Box<dyn Reflect>>::type_info(), &settings).unwrap();

    let dictionary = back.downcast_ref::<Dictionary>().unwrap();
    let list = dictionary["b"].downcast_ref::<Items>().unwrap();
    assert_eq!(list[0].downcast_ref::<i64>(), Some(&1));
    assert_eq!(list[1].downcast_ref::<String>().map(String::as_str), Some("x"));

    let nested = dictionary["a"].downcast_ref::<Dictionary>().unwrap();
    assert_eq!(nested.len(), 1);
    assert_eq!(nested["k"].downcast_ref::<bool>(), Some(&true));
}
