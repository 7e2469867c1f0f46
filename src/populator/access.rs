use super::*;

/// Fallback that can't collide with any stored value: models compare by identity.
#[derive(Debug)]
struct Unresolved;

impl model::Model for Unresolved {}

/// Strip the `Unresolved` marker from a lookup result.
///
/// `None` when the field didn't resolve, including a fan-out where every
/// entry fell back. Entries that fell back individually become `Null`.
fn settle(value: Value, sentinel: &Value) -> Option<Value> {
    match value {
        v if &v == sentinel => None,
        Value::Map(map) => {
            if map.values().all(|v| v == sentinel) {
                return None;
            }
            Some(Value::Map(
                map.into_iter()
                    .map(|(k, v)| if &v == sentinel { (k, Value::Null) } else { (k, v) })
                    .collect(),
            ))
        }
        Value::Array(entries) => {
            if entries.iter().all(|v| v == sentinel) {
                return None;
            }
            Some(Value::Array(
                entries
                    .into_iter()
                    .map(|v| if &v == sentinel { Value::Null } else { v })
                    .collect(),
            ))
        }
        other => Some(other),
    }
}

impl Populator {
    /// Get a field converted to `T`.
    ///
    /// # Examples
    /// ```
    /// # use former_populator::Populator;
    /// let populator = Populator::from_json_str(r#"{"user": {"age": 36}}"#).unwrap();
    /// let age: u8 = populator.get_as("user[age]").unwrap();
    /// assert_eq!(age, 36);
    /// ```
    ///
    /// # Errors
    /// Returns a type error if the resolved value can't be converted to `T`.
    pub fn get_as<T>(&self, field: &str) -> Result<T, PopulatorError>
    where
        T: TryFrom<Value, Error = PopulatorError>,
    {
        T::try_from(self.get(field)).map_err(|e| e.for_field(field))
    }

    /// Get an optional typed value - `None` if the field doesn't resolve or is null.
    ///
    /// Entries of a fan-out that fell back are handed to `T` as `Null`.
    pub fn get_optional<T>(&self, field: &str) -> Result<Option<T>, PopulatorError>
    where
        T: TryFrom<Value, Error = PopulatorError>,
    {
        let sentinel = Value::model(Unresolved);
        match settle(self.get_or(field, sentinel.clone()), &sentinel) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => T::try_from(v).map(Some).map_err(|e| e.for_field(field)),
        }
    }

    /// Check whether a field resolves without falling back.
    ///
    /// A fan-out across a collection counts as resolved when at least one
    /// entry resolved.
    pub fn has(&self, field: &str) -> bool {
        if field.is_empty() {
            return false;
        }
        let sentinel = Value::model(Unresolved);
        settle(self.get_or(field, sentinel.clone()), &sentinel).is_some()
    }
}
