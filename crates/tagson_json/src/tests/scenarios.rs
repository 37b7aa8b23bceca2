use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use serde_json::json;
use tagson_reflect::{Reflect, Shared};

use super::parse;
use crate::{
    DeserializeSettings, SerializeSettings, from_json_reader, from_json_str, from_json_value, to_json_string,
    to_json_writer,
};

#[derive(Reflect, Default, Debug)]
#[reflect(default)]
struct Profile {
    #[reflect(alias = "Name")]
    name: String,
    #[reflect(alias = "Tags")]
    tags: Vec<String>,
    #[reflect(alias = "Self")]
    self_ref: Option<Shared<Profile>>,
}

#[derive(Reflect, Default, Debug)]
#[reflect(default)]
struct Node {
    x: i32,
}

#[derive(Reflect, Default, Debug)]
#[reflect(default)]
struct Holder {
    a: Shared<Node>,
    b: Shared<Node>,
}

#[test]
fn profile_survives_a_round_trip() {
    let input = json!({ "Name": "Ann", "Tags": ["a", "b"], "Self": null });
    let profile: Profile = from_json_value(&input, &DeserializeSettings::default()).unwrap();

    let text = to_json_string(&profile, &SerializeSettings::default()).unwrap();
    assert_eq!(parse(&text), input);

    let back: Profile = from_json_str(&text, &DeserializeSettings::default()).unwrap();
    assert_eq!(back.name, "Ann");
    assert_eq!(back.tags, ["a", "b"]);
    assert!(back.self_ref.is_none());
}

#[test]
fn two_fields_one_node() {
    let input = json!({ "A": { "$id": 1, "X": 5 }, "B": { "$ref": 1 } });
    let holder: Holder = from_json_value(&input, &DeserializeSettings::default()).unwrap();

    assert_eq!(holder.a.read().x, 5);
    assert!(Shared::ptr_eq(&holder.a, &holder.b));

    holder.b.write().x = 6;
    assert_eq!(holder.a.read().x, 6);
}

#[test]
fn differently_cased_keys() {
    let profile = Profile {
        name: "Bo".to_string(),
        tags: vec!["x".to_string()],
        self_ref: None,
    };
    let text = to_json_string(&profile, &SerializeSettings::default()).unwrap();
    let shouted = text.replace("\"Name\"", "\"NAME\"").replace("\"Tags\"", "\"tags\"");

    let back: Profile = from_json_str(&shouted, &DeserializeSettings::default()).unwrap();
    assert_eq!(back.name, "Bo");
    assert_eq!(back.tags, ["x"]);
}

#[test]
fn reader_and_writer() {
    let profile = Profile {
        name: "Cy".to_string(),
        tags: Vec::new(),
        self_ref: None,
    };
    let mut buffer = Vec::new();
    to_json_writer(&mut buffer, &profile, &SerializeSettings::default()).unwrap();

    let back: Profile = from_json_reader(buffer.as_slice(), &DeserializeSettings::default()).unwrap();
    assert_eq!(back.name, "Cy");
}

#[test]
fn concurrent_calls_share_the_caches() {
    use std::thread;

    let handles = (0..4)
        .map(|index| {
            thread::spawn(move || {
                let profile = Profile {
                    name: index.to_string(),
                    tags: vec![index.to_string(); index],
                    self_ref: None,
                };
                let text = to_json_string(&profile, &SerializeSettings::default()).unwrap();
                let back: Profile = from_json_str(&text, &DeserializeSettings::default()).unwrap();
                (back.name, back.tags.len())
            })
        })
        .collect::<Vec<_>>();

    for (index, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), (index.to_string(), index));
    }
}
