// Author: Dustin Pilgrim
// License: MIT

use serde_json::json;

use crate::value::Value;
use crate::PopulatorError;

/// Convert a `Value` to its JSON equivalent.
///
/// - Null, booleans, numbers, strings → direct mapping
/// - Arrays, maps → nested JSON structures, key order preserved
/// - Models → their converted map, else their reflected fields, else `null`
pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => json!(b),
        Value::Number(n) => json!(n),
        Value::String(s) => json!(s),
        Value::Array(arr) => json!(arr.iter().map(value_to_json).collect::<Vec<_>>()),
        Value::Map(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
        Value::Model(model) => {
            let fields = model
                .as_map_convertible()
                .map(|m| m.to_map())
                .or_else(|| model.as_reflectable().map(|r| r.reflect_fields()));

            match fields {
                Some(fields) => serde_json::Value::Object(
                    fields
                        .iter()
                        .map(|(k, v)| (k.clone(), value_to_json(v)))
                        .collect(),
                ),
                None => serde_json::Value::Null,
            }
        }
    }
}

/// Convert decoded JSON into a `Value`. Objects become maps in document order.
pub fn value_from_json(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(value_from_json).collect()),
        serde_json::Value::Object(obj) => Value::Map(
            obj.into_iter()
                .map(|(k, v)| (k, value_from_json(v)))
                .collect(),
        ),
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        value_from_json(v)
    }
}

/// Export a value as pretty-printed JSON.
///
/// # Examples
/// ```
/// use former_populator::{Value, export::export_to_json};
///
/// let items: Value = [("name", "Ada")].into_iter().collect();
/// let json = export_to_json(&items).unwrap();
/// assert!(json.contains("\"name\": \"Ada\""));
/// ```
pub fn export_to_json(value: &Value) -> Result<String, PopulatorError> {
    Ok(serde_json::to_string_pretty(&value_to_json(value))?)
}
