// Author: Dustin Pilgrim
// License: MIT

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::export::{export_to_json, value_from_json};
use crate::field::{self, COLLECTION_MARKER};
use crate::model;
use crate::value::Value;
use crate::PopulatorError;

mod access;
mod conversion;

/// Holds the values a form is populated with, and fetches them by field name.
///
/// The backing items are either a mapping (possibly nested, possibly holding
/// models) or a single model-like object.
///
/// # Example
/// ```
/// use former_populator::{Populator, Value};
///
/// let items: Value = [("name", "Ada")].into_iter().collect();
/// let populator = Populator::new(items);
/// assert_eq!(populator.get("name"), Value::from("Ada"));
/// assert_eq!(populator.get_or("email", "none"), Value::from("none"));
/// ```
#[derive(Debug, Clone)]
pub struct Populator {
    items: Value,
}

impl Default for Populator {
    fn default() -> Self {
        Self { items: Value::empty_map() }
    }
}

impl Populator {
    pub fn new(items: impl Into<Value>) -> Self {
        Self { items: items.into() }
    }

    /// Parse backing items from a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, PopulatorError> {
        let json: serde_json::Value = serde_json::from_str(content)?;
        Ok(Self::new(value_from_json(json)))
    }

    /// Load backing items from a JSON file. A leading `~/` expands to the home directory.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PopulatorError> {
        let raw = path.as_ref().to_string_lossy().to_string();
        let path = expand_home(&raw)?;

        let content = fs::read_to_string(&path).map_err(|e| PopulatorError::FileError {
            message: format!("Failed to read file: {}", e),
            path: path.to_string_lossy().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        debug!("loading populator items from {}", path.display());
        Self::from_json_str(&content).map_err(|e| match e {
            PopulatorError::ParseError { message, line, column, .. } => PopulatorError::FileError {
                message: format!("Invalid JSON at {}:{}: {}", line, column, message),
                path: path.to_string_lossy().to_string(),
                hint: Some("Backing items must be valid JSON".into()),
                code: Some(302),
            },
            other => other,
        })
    }

    pub fn items(&self) -> &Value {
        &self.items
    }

    /// Get the value of a field, or `Null` when it can't be resolved.
    pub fn get(&self, field: &str) -> Value {
        self.get_or(field, Value::Null)
    }

    /// Get the value of a field, or `fallback` when it can't be resolved.
    ///
    /// Anonymous (empty) fields always yield `Null`, whatever the fallback.
    pub fn get_or(&self, field: &str, fallback: impl Into<Value>) -> Value {
        let fallback = fallback.into();

        if field.is_empty() {
            return Value::Null;
        }

        // Plain key on a mapping
        if self.items.is_mapping() && !field.contains('[') {
            if let Some(value) = self.items.lookup_key(field) {
                return value.clone();
            }
            if !field.contains('.') {
                return fallback;
            }
        }

        let path = field::parse_field(field);
        trace!("walking '{}' as {:?}", field, path);
        walk(&self.items, &path, &fallback)
    }

    /// Swap the backing items.
    pub fn replace(&mut self, items: impl Into<Value>) {
        self.items = items.into();
        debug!("populator items replaced with a {}", self.items.type_name());
    }

    /// Reset to an empty mapping.
    pub fn reset(&mut self) {
        self.items = Value::empty_map();
        debug!("populator items reset");
    }

    /// Resolve a single attribute on a model, bypassing field-name parsing.
    pub fn attribute_from_model(model: &Value, attribute: &str, fallback: impl Into<Value>) -> Value {
        model::attribute_from_model(model, attribute, &fallback.into())
    }

    /// Export the backing items as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, PopulatorError> {
        export_to_json(&self.items)
    }
}

/// Walk `path` down from `items`.
///
/// Models resolve each segment as an attribute and a miss ends the walk.
/// Mappings descend into a matching key, and otherwise fan the segment out
/// across every entry.
fn walk(items: &Value, path: &[String], fallback: &Value) -> Value {
    let mut current: Cow<'_, Value> = Cow::Borrowed(items);

    for segment in path {
        if !current.is_mapping() {
            let resolved = model::attribute_from_model(&current, segment, fallback);
            if &resolved == fallback {
                return resolved;
            }
            current = Cow::Owned(resolved);
            continue;
        }

        current = match current {
            Cow::Borrowed(value) => match value.lookup_key(segment) {
                Some(child) => Cow::Borrowed(child),
                None => match fan_out(value, segment, fallback) {
                    Some(fanned) => Cow::Owned(fanned),
                    None => return fallback.clone(),
                },
            },
            Cow::Owned(value) => match value.lookup_key(segment) {
                Some(child) => Cow::Owned(child.clone()),
                None => match fan_out(&value, segment, fallback) {
                    Some(fanned) => Cow::Owned(fanned),
                    None => return fallback.clone(),
                },
            },
        };
    }

    current.into_owned()
}

/// Resolve `segment` against every entry of a collection, keeping the keys.
///
/// For `items[].name`, the collection is `items` when the mapping holds it
/// (else the mapping itself) and each entry is asked for `name`. A bare
/// `items[]` yields the `items` collection itself.
///
/// `None` when there is nothing to fan out across.
fn fan_out(mapping: &Value, segment: &str, fallback: &Value) -> Option<Value> {
    let (collection, element_path) = if segment.contains(COLLECTION_MARKER) {
        match (collection_source(mapping, segment), field::element_path(segment)) {
            (Some(collection), None) => return Some(collection.clone()),
            (source, path) => (
                source.unwrap_or(mapping),
                path.unwrap_or_else(|| vec![segment.to_string()]),
            ),
        }
    } else {
        (mapping, vec![segment.to_string()])
    };

    trace!("fanning '{}' out across a {}", segment, collection.type_name());

    let resolve = |entry: &Value| resolve_element(entry, &element_path, fallback);
    match collection {
        Value::Map(map) if !map.is_empty() => {
            Some(Value::Map(map.iter().map(|(k, v)| (k.clone(), resolve(v))).collect()))
        }
        Value::Array(entries) if !entries.is_empty() => {
            Some(Value::Array(entries.iter().map(resolve).collect()))
        }
        _ => None,
    }
}

/// The collection named before `[]`, when the mapping holds it.
fn collection_source<'a>(mapping: &'a Value, segment: &str) -> Option<&'a Value> {
    let prefix = &segment[..segment.find(COLLECTION_MARKER)?];
    if prefix.is_empty() {
        return None;
    }

    let mut current = mapping;
    for key in field::parse_field(prefix) {
        current = current.lookup_key(&key)?;
    }
    current.is_mapping().then_some(current)
}

fn resolve_element(entry: &Value, path: &[String], fallback: &Value) -> Value {
    let mut current = entry.clone();
    for attribute in path {
        current = model::attribute_from_model(&current, attribute, fallback);
        if &current == fallback {
            break;
        }
    }
    current
}

/// Expand "~/" to the home directory.
fn expand_home(raw_path: &str) -> Result<PathBuf, PopulatorError> {
    match raw_path.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir().ok_or_else(|| PopulatorError::FileError {
                message: "Could not determine home directory for ~ expansion".into(),
                path: raw_path.to_string(),
                hint: Some("Set HOME or use an absolute path".into()),
                code: Some(300),
            })?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(raw_path)),
    }
}
