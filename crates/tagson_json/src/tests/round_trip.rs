use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;

use serde_json::json;
use tagson_reflect::{MultiArray, Reflect, Stack};

use super::parse;
use crate::{DeserializeSettings, JsonError, SerializeSettings, from_json_str, from_json_value, to_json_string};

#[derive(Reflect, Default, Debug, Clone, Copy, PartialEq)]
#[reflect(default)]
enum Color {
    #[default]
    Red,
    Green,
    Blue,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Sample {
    id: u64,
    name: String,
    ratio: f64,
    flag: bool,
    letter: char,
    nickname: Option<String>,
    scores: Vec<i32>,
    queue: VecDeque<i16>,
    stack: Stack<u8>,
    tags: BTreeSet<String>,
    lookup: BTreeMap<u32, String>,
    grid: MultiArray<i32, 2>,
    fixed: [i16; 3],
    pair: (u8, String),
    timeout: Duration,
    color: Color,
    blob: Vec<u8>,
    points: Vec<Point>,
}

fn sample() -> Sample {
    Sample {
        id: 7,
        name: "sample".to_string(),
        ratio: 0.25,
        flag: true,
        letter: 'q',
        nickname: Some("s".to_string()),
        scores: vec![3, -1, 4],
        queue: VecDeque::from([1, 2]),
        stack: Stack::from(vec![9, 8, 7]),
        tags: BTreeSet::from(["a".to_string(), "b".to_string()]),
        lookup: BTreeMap::from([(1, "one".to_string()), (2, "two".to_string())]),
        grid: MultiArray::new([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap(),
        fixed: [1, 2, 3],
        pair: (4, "four".to_string()),
        timeout: Duration::from_millis(1500),
        color: Color::Green,
        blob: vec![0xde, 0xad, 0xbe, 0xef],
        points: vec![Point { x: 1, y: 2 }, Point { x: -3, y: 4 }],
    }
}

#[test]
fn struct_round_trip() {
    let value = sample();
    let text = to_json_string(&value, &SerializeSettings::default()).unwrap();
    let back: Sample = from_json_str(&text, &DeserializeSettings::default()).unwrap();
    assert_eq!(back, value);
}

#[test]
fn untagged_plain_output() {
    let text = to_json_string(&Point { x: 1, y: 2 }, &SerializeSettings::default()).unwrap();
    assert_eq!(text, r#"{"x":1,"y":2}"#);

    let text = to_json_string(&sample(), &SerializeSettings::default()).unwrap();
    let tree = parse(&text);
    assert_eq!(tree["grid"], json!([[1, 2, 3], [4, 5, 6]]));
    assert_eq!(tree["lookup"], json!({ "1": "one", "2": "two" }));
    assert_eq!(tree["pair"], json!([4, "four"]));
    assert_eq!(tree["color"], json!("Green"));
    assert_eq!(tree["blob"], json!("3q2+7w=="));
    assert_eq!(tree["timeout"], json!("PT1.5S"));
    assert!(tree.get("$type").is_none());
}

#[test]
fn non_string_keys_use_pairs() {
    let value = BTreeMap::from([((1_u8, 2_u8), "a".to_string()), ((3, 4), "b".to_string())]);
    let text = to_json_string(&value, &SerializeSettings::default()).unwrap();
    assert_eq!(
        parse(&text),
        json!({ "$kv": [{ "$k": [1, 2], "$v": "a" }, { "$k": [3, 4], "$v": "b" }] })
    );

    let back: BTreeMap<(u8, u8), String> = from_json_str(&text, &DeserializeSettings::default()).unwrap();
    assert_eq!(back, value);
}

#[test]
fn enums_by_name_or_discriminant() {
    let settings = DeserializeSettings::default();
    assert_eq!(from_json_value::<Color>(&json!("Blue"), &settings).unwrap(), Color::Blue);
    assert_eq!(from_json_value::<Color>(&json!("blue"), &settings).unwrap(), Color::Blue);
    assert_eq!(from_json_value::<Color>(&json!(1), &settings).unwrap(), Color::Green);
    assert_eq!(from_json_value::<Color>(&json!("2"), &settings).unwrap(), Color::Blue);
    assert!(matches!(
        from_json_value::<Color>(&json!("Purple"), &settings),
        Err(JsonError::TypeMismatch { .. })
    ));

    let by_number = SerializeSettings::default().with_use_enum_names(false);
    assert_eq!(to_json_string(&Color::Blue, &by_number).unwrap(), "2");
}

#[test]
fn numeric_conversions() {
    let settings = DeserializeSettings::default();
    assert_eq!(from_json_value::<u32>(&json!("42"), &settings).unwrap(), 42);
    assert_eq!(from_json_value::<i32>(&json!(3.0), &settings).unwrap(), 3);
    assert_eq!(from_json_value::<f32>(&json!(2), &settings).unwrap(), 2.0);
    assert!(matches!(
        from_json_value::<u8>(&json!(300), &settings),
        Err(JsonError::TypeMismatch { .. })
    ));
    assert!(matches!(
        from_json_value::<i32>(&json!(3.5), &settings),
        Err(JsonError::TypeMismatch { .. })
    ));
}

#[test]
fn bytes_from_number_array() {
    let back: Vec<u8> = from_json_value(&json!([1, 2, 255]), &DeserializeSettings::default()).unwrap();
    assert_eq!(back, [1, 2, 255]);
}

#[test]
fn null_reads_as_default() {
    let settings = DeserializeSettings::default();
    let back: Point = from_json_value(&json!({ "x": null, "y": 5 }), &settings).unwrap();
    assert_eq!(back, Point { x: 0, y: 5 });

    let back: Option<Point> = from_json_value(&json!(null), &settings).unwrap();
    assert_eq!(back, None);
}

#[test]
fn jagged_arrays_are_rejected() {
    let result = from_json_value::<MultiArray<i32, 2>>(&json!([[1, 2], [3]]), &DeserializeSettings::default());
    assert!(matches!(result, Err(JsonError::TypeMismatch { .. })));
}

#[test]
fn read_only_containers() {
    use alloc::sync::Arc;

    let value: Arc<[u16]> = Arc::from(vec![1_u16, 2, 3]);
    let text = to_json_string(&value, &SerializeSettings::default()).unwrap();
    assert_eq!(text, "[1,2,3]");

    let back: Arc<[u16]> = from_json_str(&text, &DeserializeSettings::default()).unwrap();
    assert_eq!(&*back, &[1, 2, 3]);
}

#[test]
fn reserved_map_keys_use_pairs() {
    let mut value = BTreeMap::new();
    value.insert(String::from("$ref"), 7_i32);
    value.insert(String::from("plain"), 1);

    let text = to_json_string(&value, &SerializeSettings::default()).unwrap();
    assert_eq!(
        parse(&text),
        json!({ "$kv": [{ "$k": "$ref", "$v": 7 }, { "$k": "plain", "$v": 1 }] })
    );

    let back: BTreeMap<String, i32> = from_json_str(&text, &DeserializeSettings::default()).unwrap();
    assert_eq!(back, value);

    // Keys merely starting with `$` stay plain.
    let value = BTreeMap::from([(String::from("$k"), 2_i32)]);
    let text = to_json_string(&value, &SerializeSettings::default()).unwrap();
    assert_eq!(text, r#"{"$k":2}"#);
}
