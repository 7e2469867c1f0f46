// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{PopulatorError, Value};

fn expected_number(value: &Value) -> PopulatorError {
    PopulatorError::type_error(
        format!("Expected number, got {}", value.type_name()),
        "Populate this field with a number",
        402,
    )
}

/// Strings also accept numbers, rendered the way a form field would show them.
impl TryFrom<Value> for String {
    type Error = PopulatorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) if n.is_finite() && n.fract() == 0.0 => Ok(format!("{}", n as i64)),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(PopulatorError::type_error(
                format!("Expected string, got {}", value.type_name()),
                "Populate this field with a string",
                401,
            )),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = PopulatorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => Ok(n),
            _ => Err(expected_number(&value)),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = PopulatorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => Ok(n as f32),
            _ => Err(expected_number(&value)),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = PopulatorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => Ok(n as i32),
            _ => Err(expected_number(&value)),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = PopulatorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => Ok(n as i64),
            _ => Err(expected_number(&value)),
        }
    }
}

macro_rules! unsigned_try_from {
    ($($t:ty => $code:expr),*) => {
        $(impl TryFrom<Value> for $t {
            type Error = PopulatorError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::Number(n) if n >= 0.0 && n <= <$t>::MAX as f64 => Ok(n as $t),
                    Value::Number(n) => Err(PopulatorError::type_error(
                        format!("Number {} out of range for {}", n, stringify!($t)),
                        concat!("Use a number between 0 and ", stringify!($t), "::MAX"),
                        $code,
                    )),
                    _ => Err(expected_number(&value)),
                }
            }
        })*
    };
}

unsigned_try_from!(u8 => 407, u16 => 403, u32 => 408, u64 => 406, usize => 409);

impl TryFrom<Value> for bool {
    type Error = PopulatorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(PopulatorError::type_error(
                format!("Expected boolean, got {}", value.type_name()),
                "Populate this field with true or false",
                404,
            )),
        }
    }
}

/// Arrays convert element-wise; maps (e.g. a fan-out result) convert their values in order.
impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = PopulatorError>,
{
    type Error = PopulatorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(arr) => arr.into_iter().map(T::try_from).collect(),
            Value::Map(map) => map.into_values().map(T::try_from).collect(),
            _ => Err(PopulatorError::type_error(
                format!("Expected array, got {}", value.type_name()),
                "Populate this field with a list",
                405,
            )),
        }
    }
}

impl<T> TryFrom<Value> for Option<T>
where
    T: TryFrom<Value, Error = PopulatorError>,
{
    type Error = PopulatorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(None),
            v => Ok(Some(T::try_from(v)?)),
        }
    }
}

impl TryFrom<Value> for IndexMap<String, Value> {
    type Error = PopulatorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Map(map) => Ok(map),
            Value::Array(arr) => Ok(arr
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect()),
            _ => Err(PopulatorError::type_error(
                format!("Expected map, got {}", value.type_name()),
                "Populate this field with a mapping",
                410,
            )),
        }
    }
}

impl TryFrom<Value> for HashMap<String, String> {
    type Error = PopulatorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let map = IndexMap::<String, Value>::try_from(value)?;
        let mut out = HashMap::new();
        for (key, val) in map {
            out.insert(key, String::try_from(val)?);
        }
        Ok(out)
    }
}
