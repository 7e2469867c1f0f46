// Author: Dustin Pilgrim
// License: MIT

//! Model-like objects and the ordered attribute resolution over them.
//!
//! Host applications hand the populator objects from unrelated data-modeling
//! layers. Instead of asking what a model *is*, the resolver asks what it can
//! *do*: every capability below is an optional view on [`Model`], and
//! [`attribute_from_model`] tries them in a fixed order.

use std::fmt;

use indexmap::IndexMap;
use log::trace;
use serde::Serialize;

use crate::export::value_from_json;
use crate::value::Value;

/// Anti-forgery submit marker. Never resolved from a model.
pub const RESERVED_TOKEN: &str = "_token";

/// An iterable group of key/value entries.
pub trait KeyedGroup {
    fn entries(&self) -> Vec<(String, Value)>;
}

/// A generic `get(name)` accessor. Its answer is final, even when it is `Null`.
pub trait KeyedGet {
    fn get(&self, name: &str) -> Value;
}

/// A structured model with a typed attribute accessor. Its answer is final.
pub trait AttributeModel {
    fn attribute(&self, name: &str) -> Value;
}

/// Anything that can be flattened into a plain mapping.
pub trait MapConvertible {
    fn to_map(&self) -> IndexMap<String, Value>;
}

/// A custom serializable value type exposing conventional getters such as `getAmount`.
pub trait CustomSerializable {
    /// Invoke the getter named `getter`, or `None` when no such getter exists.
    fn call_getter(&self, getter: &str) -> Option<Value>;
}

/// Visible fields of a plain struct.
pub trait ReflectableStruct {
    fn reflect_fields(&self) -> IndexMap<String, Value>;
}

/// A model-like object. Implementors opt into the capabilities they support.
pub trait Model: fmt::Debug {
    fn as_keyed_group(&self) -> Option<&dyn KeyedGroup> {
        None
    }

    fn as_keyed_get(&self) -> Option<&dyn KeyedGet> {
        None
    }

    fn as_attribute_model(&self) -> Option<&dyn AttributeModel> {
        None
    }

    fn as_map_convertible(&self) -> Option<&dyn MapConvertible> {
        None
    }

    fn as_custom_serializable(&self) -> Option<&dyn CustomSerializable> {
        None
    }

    fn as_reflectable(&self) -> Option<&dyn ReflectableStruct> {
        None
    }
}

/// Conventional getter name for an attribute: `amount` → `getAmount`.
pub fn getter_name(attribute: &str) -> String {
    let mut chars = attribute.chars();
    match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => "get".to_string(),
    }
}

/// Reflect the visible fields of any serializable struct.
///
/// Anything that doesn't serialize to an object reflects zero fields.
pub fn reflect_fields<T: Serialize + ?Sized>(value: &T) -> IndexMap<String, Value> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(fields)) => fields
            .into_iter()
            .map(|(k, v)| (k, value_from_json(v)))
            .collect(),
        _ => IndexMap::new(),
    }
}

/// Wraps a plain serializable struct as a reflect-only model.
#[derive(Debug, Clone)]
pub struct Reflected<T>(pub T);

impl<T: Serialize + fmt::Debug> ReflectableStruct for Reflected<T> {
    fn reflect_fields(&self) -> IndexMap<String, Value> {
        reflect_fields(&self.0)
    }
}

impl<T: Serialize + fmt::Debug> Model for Reflected<T> {
    fn as_reflectable(&self) -> Option<&dyn ReflectableStruct> {
        Some(self)
    }
}

/// Resolve `attribute` against a model-like value, returning `fallback` when
/// no capability can answer.
///
/// Order, first answer wins:
/// 1. the reserved `_token` name always yields the fallback
/// 2. keyed group entries
/// 3. generic `get(name)` accessor
/// 4. typed attribute accessor
/// 5. conversion to a mapping
/// 6. conventional `get<Name>` getter
/// 7. reflected fields
pub fn attribute_from_model(model: &Value, attribute: &str, fallback: &Value) -> Value {
    if attribute == RESERVED_TOKEN {
        return fallback.clone();
    }

    let model = match model {
        Value::Model(model) => model,
        // A mapping forced into a mapping is itself.
        Value::Map(_) | Value::Array(_) => {
            return model.lookup_key(attribute).cloned().unwrap_or_else(|| fallback.clone());
        }
        _ => {
            trace!("'{}' requested from a {} value", attribute, model.type_name());
            return fallback.clone();
        }
    };

    if let Some(group) = model.as_keyed_group() {
        if let Some((_, value)) = group.entries().into_iter().find(|(k, _)| k == attribute) {
            trace!("'{}' resolved from keyed group", attribute);
            return value;
        }
    }

    if let Some(accessor) = model.as_keyed_get() {
        trace!("'{}' resolved through keyed get", attribute);
        return accessor.get(attribute);
    }

    if let Some(typed) = model.as_attribute_model() {
        trace!("'{}' resolved through attribute accessor", attribute);
        return typed.attribute(attribute);
    }

    if let Some(convertible) = model.as_map_convertible() {
        if let Some(value) = convertible.to_map().shift_remove(attribute) {
            trace!("'{}' resolved from converted map", attribute);
            return value;
        }
    }

    if let Some(serializable) = model.as_custom_serializable() {
        if let Some(value) = serializable.call_getter(&getter_name(attribute)) {
            trace!("'{}' resolved through getter", attribute);
            return value;
        }
    }

    if let Some(value) = model
        .as_reflectable()
        .and_then(|r| r.reflect_fields().shift_remove(attribute))
    {
        trace!("'{}' resolved from reflected fields", attribute);
        return value;
    }

    trace!("'{}' not found on {:?}, using fallback", attribute, model);
    fallback.clone()
}

#[cfg(test)]
mod tests;
