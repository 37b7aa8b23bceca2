use serde_json::json;
use tagson_reflect::{Reflect, Shared};

use super::parse;
use crate::{DeserializeSettings, JsonError, SerializeSettings, from_json_str, from_json_value, to_json_string};

#[derive(Reflect, Default, Debug)]
#[reflect(default)]
struct Node {
    x: i32,
    next: Option<Shared<Node>>,
}

#[derive(Reflect, Default, Debug)]
#[reflect(default)]
struct Pair {
    a: Shared<Node>,
    b: Shared<Node>,
}

fn shared_pair() -> Pair {
    let node = Shared::new(Node { x: 5, next: None });
    Pair {
        a: node.clone(),
        b: node,
    }
}

fn self_loop() -> Shared<Node> {
    let node = Shared::new(Node { x: 1, next: None });
    node.write().next = Some(node.clone());
    node
}

#[test]
fn one_id_and_one_ref() {
    let settings = SerializeSettings::default().with_preserve_references(true);
    let text = to_json_string(&shared_pair(), &settings).unwrap();
    assert_eq!(
        parse(&text),
        json!({ "a": { "$id": 1, "x": 5, "next": null }, "b": { "$ref": 1 } })
    );

    let back: Pair = from_json_str(&text, &DeserializeSettings::default()).unwrap();
    assert!(Shared::ptr_eq(&back.a, &back.b));
    assert_eq!(back.a.read().x, 5);
}

#[test]
fn copies_without_preservation() {
    let text = to_json_string(&shared_pair(), &SerializeSettings::default()).unwrap();
    assert_eq!(
        parse(&text),
        json!({ "a": { "x": 5, "next": null }, "b": { "x": 5, "next": null } })
    );

    let back: Pair = from_json_str(&text, &DeserializeSettings::default()).unwrap();
    assert!(!Shared::ptr_eq(&back.a, &back.b));
    assert_eq!(back.b.read().x, 5);
}

#[test]
fn cycle_is_written_as_ref() {
    let settings = SerializeSettings::default().with_preserve_references(true);
    let text = to_json_string(&self_loop(), &settings).unwrap();
    assert_eq!(parse(&text), json!({ "$id": 1, "x": 1, "next": { "$ref": 1 } }));

    let back: Shared<Node> = from_json_str(&text, &DeserializeSettings::default()).unwrap();
    let guard = back.read();
    assert_eq!(guard.x, 1);
    let next = guard.next.as_ref().unwrap();
    assert!(Shared::ptr_eq(next, &back));
}

#[test]
fn cycle_without_preservation() {
    let strict = SerializeSettings::default();
    assert!(matches!(
        to_json_string(&self_loop(), &strict),
        Err(JsonError::CircularReference { .. })
    ));

    let lenient = SerializeSettings::default().with_error_on_circular_ref(false);
    let text = to_json_string(&self_loop(), &lenient).unwrap();
    assert_eq!(parse(&text), json!({ "x": 1, "next": null }));
}

#[test]
fn unknown_ref_id() {
    let result = from_json_value::<Pair>(
        &json!({ "a": { "$id": 1, "x": 5 }, "b": { "$ref": 2 } }),
        &DeserializeSettings::default(),
    );
    assert!(matches!(result, Err(JsonError::UnknownReference { id: 2 })));
}

#[test]
fn shared_scalars_and_lists() {
    use alloc::vec;
    use alloc::vec::Vec;

    let items = Shared::new(vec![1_u16, 2]);
    let value = (items.clone(), items);
    let settings = SerializeSettings::default().with_preserve_references(true);
    let text = to_json_string(&value, &settings).unwrap();
    assert_eq!(parse(&text), json!([{ "$id": 1, "$values": [1, 2] }, { "$ref": 1 }]));

    let back: (Shared<Vec<u16>>, Shared<Vec<u16>>) =
        from_json_str(&text, &DeserializeSettings::default()).unwrap();
    assert!(Shared::ptr_eq(&back.0, &back.1));
    assert_eq!(*back.0.read(), [1, 2]);
}

#[test]
fn cycle_through_shared_list() {
    use alloc::boxed::Box;
    use alloc::vec::Vec;

    type Items = Shared<Vec<Box<dyn Reflect>>>;

    let list: Items = Shared::new(Vec::new());
    let item: Box<dyn Reflect> = Box::new(list.clone());
    list.write().push(item);

    let settings = SerializeSettings::default().with_preserve_references(true);
    let text = to_json_string(&list, &settings).unwrap();
    assert_eq!(parse(&text), json!({ "$id": 1, "$values": [{ "$ref": 1 }] }));

    let back: Items = from_json_str(&text, &DeserializeSettings::default()).unwrap();
    let guard = back.read();
    assert_eq!(guard.len(), 1);
    let inner = guard[0].downcast_ref::<Items>().unwrap();
    assert!(Shared::ptr_eq(inner, &back));
}

#[test]
fn cycle_through_shared_map() {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::shape::DefaultDictionary;

    let map = Shared::new(DefaultDictionary::default());
    let entry: Box<dyn Reflect> = Box::new(map.clone());
    map.write().insert(String::from("me"), entry);

    let settings = SerializeSettings::default().with_preserve_references(true);
    let text = to_json_string(&map, &settings).unwrap();
    assert_eq!(parse(&text), json!({ "$id": 1, "me": { "$ref": 1 } }));

    let back: Shared<DefaultDictionary> = from_json_str(&text, &DeserializeSettings::default()).unwrap();
    let guard = back.read();
    let inner = guard["me"].downcast_ref::<Shared<DefaultDictionary>>().unwrap();
    assert!(Shared::ptr_eq(inner, &back));
}
