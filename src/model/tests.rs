// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;

use serde::Serialize;

use super::*;

#[derive(Debug)]
struct Group(Vec<(String, Value)>);

impl KeyedGroup for Group {
    fn entries(&self) -> Vec<(String, Value)> {
        self.0.clone()
    }
}

impl Model for Group {
    fn as_keyed_group(&self) -> Option<&dyn KeyedGroup> {
        Some(self)
    }
}

#[derive(Debug, Default)]
struct Document(HashMap<String, Value>);

impl KeyedGet for Document {
    fn get(&self, name: &str) -> Value {
        self.0.get(name).cloned().unwrap_or_default()
    }
}

impl Model for Document {
    fn as_keyed_get(&self) -> Option<&dyn KeyedGet> {
        Some(self)
    }
}

#[derive(Debug)]
struct Entity {
    name: &'static str,
}

impl AttributeModel for Entity {
    fn attribute(&self, name: &str) -> Value {
        match name {
            "name" => Value::from(self.name),
            _ => Value::Null,
        }
    }
}

impl Model for Entity {
    fn as_attribute_model(&self) -> Option<&dyn AttributeModel> {
        Some(self)
    }
}

/// Answers through both a generic getter and a typed accessor, with different values.
#[derive(Debug)]
struct DualAccess;

impl KeyedGet for DualAccess {
    fn get(&self, _name: &str) -> Value {
        Value::from("from keyed get")
    }
}

impl AttributeModel for DualAccess {
    fn attribute(&self, _name: &str) -> Value {
        Value::from("from attribute")
    }
}

impl Model for DualAccess {
    fn as_keyed_get(&self) -> Option<&dyn KeyedGet> {
        Some(self)
    }

    fn as_attribute_model(&self) -> Option<&dyn AttributeModel> {
        Some(self)
    }
}

#[derive(Debug)]
struct Record;

impl MapConvertible for Record {
    fn to_map(&self) -> IndexMap<String, Value> {
        [("id".to_string(), Value::from(7))].into_iter().collect()
    }
}

impl CustomSerializable for Record {
    fn call_getter(&self, getter: &str) -> Option<Value> {
        (getter == "getLabel").then(|| Value::from("Record #7"))
    }
}

impl Model for Record {
    fn as_map_convertible(&self) -> Option<&dyn MapConvertible> {
        Some(self)
    }

    fn as_custom_serializable(&self) -> Option<&dyn CustomSerializable> {
        Some(self)
    }
}

#[derive(Debug, Serialize)]
struct Plain {
    city: String,
    zip: u32,
}

/// Keyed group entries plus reflected struct fields.
#[derive(Debug, Serialize)]
struct Parcel {
    size: u32,
}

impl KeyedGroup for Parcel {
    fn entries(&self) -> Vec<(String, Value)> {
        vec![("color".into(), Value::from("red"))]
    }
}

impl ReflectableStruct for Parcel {
    fn reflect_fields(&self) -> IndexMap<String, Value> {
        reflect_fields(self)
    }
}

impl Model for Parcel {
    fn as_keyed_group(&self) -> Option<&dyn KeyedGroup> {
        Some(self)
    }

    fn as_reflectable(&self) -> Option<&dyn ReflectableStruct> {
        Some(self)
    }
}

/// Converts to a map, and reflects more fields than the map carries.
#[derive(Debug, Serialize)]
struct Snapshot {
    id: u32,
    note: &'static str,
}

impl MapConvertible for Snapshot {
    fn to_map(&self) -> IndexMap<String, Value> {
        [("id".to_string(), Value::from(7))].into_iter().collect()
    }
}

impl ReflectableStruct for Snapshot {
    fn reflect_fields(&self) -> IndexMap<String, Value> {
        reflect_fields(self)
    }
}

impl Model for Snapshot {
    fn as_map_convertible(&self) -> Option<&dyn MapConvertible> {
        Some(self)
    }

    fn as_reflectable(&self) -> Option<&dyn ReflectableStruct> {
        Some(self)
    }
}

#[derive(Debug)]
struct Opaque;

impl Model for Opaque {}

fn fallback() -> Value {
    Value::from("fallback")
}

#[test]
fn test_getter_name() {
    assert_eq!(getter_name("amount"), "getAmount");
    assert_eq!(getter_name("a"), "getA");
    assert_eq!(getter_name("éclair"), "getÉclair");
    assert_eq!(getter_name(""), "get");
}

#[test]
fn test_keyed_group_entries() {
    let model = Value::model(Group(vec![("color".into(), Value::from("red"))]));
    assert_eq!(attribute_from_model(&model, "color", &fallback()), Value::from("red"));
    assert_eq!(attribute_from_model(&model, "size", &fallback()), fallback());
}

#[test]
fn test_keyed_get_answer_is_final() {
    let mut doc = Document::default();
    doc.0.insert("title".into(), Value::from("Hello"));
    let model = Value::model(doc);

    assert_eq!(attribute_from_model(&model, "title", &fallback()), Value::from("Hello"));
    // The accessor answered Null, so no fallback is applied.
    assert_eq!(attribute_from_model(&model, "missing", &fallback()), Value::Null);
}

#[test]
fn test_attribute_model() {
    let model = Value::model(Entity { name: "Ada" });
    assert_eq!(attribute_from_model(&model, "name", &fallback()), Value::from("Ada"));
}

#[test]
fn test_keyed_get_wins_over_attribute_accessor() {
    let model = Value::model(DualAccess);
    assert_eq!(
        attribute_from_model(&model, "anything", &fallback()),
        Value::from("from keyed get")
    );
}

#[test]
fn test_map_conversion_then_getter() {
    let model = Value::model(Record);
    assert_eq!(attribute_from_model(&model, "id", &fallback()), Value::Number(7.0));
    assert_eq!(attribute_from_model(&model, "label", &fallback()), Value::from("Record #7"));
    assert_eq!(attribute_from_model(&model, "other", &fallback()), fallback());
}

#[test]
fn test_keyed_group_miss_falls_through_to_reflection() {
    let model = Value::model(Parcel { size: 3 });
    assert_eq!(attribute_from_model(&model, "color", &fallback()), Value::from("red"));
    assert_eq!(attribute_from_model(&model, "size", &fallback()), Value::Number(3.0));
    assert_eq!(attribute_from_model(&model, "weight", &fallback()), fallback());
}

#[test]
fn test_map_conversion_miss_falls_through_to_reflection() {
    let model = Value::model(Snapshot { id: 99, note: "nightly" });

    // The converted map answers first.
    assert_eq!(attribute_from_model(&model, "id", &fallback()), Value::Number(7.0));
    assert_eq!(attribute_from_model(&model, "note", &fallback()), Value::from("nightly"));
    assert_eq!(attribute_from_model(&model, "other", &fallback()), fallback());
}

#[test]
fn test_reflected_fields() {
    let model = Value::model(Reflected(Plain { city: "Lyon".into(), zip: 69001 }));
    assert_eq!(attribute_from_model(&model, "city", &fallback()), Value::from("Lyon"));
    assert_eq!(attribute_from_model(&model, "zip", &fallback()), Value::Number(69001.0));
    assert_eq!(attribute_from_model(&model, "street", &fallback()), fallback());
}

#[test]
fn test_reflecting_a_non_struct_yields_no_fields() {
    assert!(reflect_fields(&42).is_empty());
    assert!(reflect_fields(&vec![1, 2]).is_empty());
}

#[test]
fn test_token_is_always_ignored() {
    let mut doc = Document::default();
    doc.0.insert(RESERVED_TOKEN.into(), Value::from("csrf"));

    let models = [
        Value::model(doc),
        Value::model(Group(vec![(RESERVED_TOKEN.into(), Value::from("csrf"))])),
        [(RESERVED_TOKEN, "csrf")].into_iter().collect(),
    ];

    for model in &models {
        assert_eq!(attribute_from_model(model, RESERVED_TOKEN, &fallback()), fallback());
    }
}

#[test]
fn test_no_capability_falls_back() {
    let model = Value::model(Opaque);
    assert_eq!(attribute_from_model(&model, "name", &fallback()), fallback());
}

#[test]
fn test_scalars_fall_back() {
    assert_eq!(attribute_from_model(&Value::Null, "name", &fallback()), fallback());
    assert_eq!(attribute_from_model(&Value::from("text"), "len", &fallback()), fallback());
}

#[test]
fn test_mapping_resolves_by_key() {
    let model: Value = [("name", "Ada")].into_iter().collect();
    assert_eq!(attribute_from_model(&model, "name", &fallback()), Value::from("Ada"));
    assert_eq!(attribute_from_model(&model, "email", &fallback()), fallback());

    let list = Value::from(vec!["a", "b"]);
    assert_eq!(attribute_from_model(&list, "1", &fallback()), Value::from("b"));
}
