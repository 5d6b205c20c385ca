//! Row records handed to the engine by a row source.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record of a dataset: column key to raw string value, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: IndexMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Value for `key`, with absence read as the empty string.
    pub fn value_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a row from a decoded JSON object, coercing every value to text.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        object
            .iter()
            .map(|(key, value)| (key.clone(), coerce_json_value(value)))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// String form of a JSON value as a row cell.
pub fn coerce_json_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                int.to_string()
            } else if let Some(uint) = number.as_u64() {
                uint.to_string()
            } else {
                number
                    .as_f64()
                    .map(|float| float.to_string())
                    .unwrap_or_else(|| number.to_string())
            }
        }
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_keys_read_as_empty() {
        let row: Row = [("name", "Ada")].into_iter().collect();
        assert_eq!(row.value_or_empty("name"), "Ada");
        assert_eq!(row.value_or_empty("email"), "");
        assert!(!row.contains_key("email"));
    }

    #[test]
    fn json_scalars_are_coerced() {
        let value = json!({
            "id": 7,
            "score": 2.5,
            "whole": 3.0,
            "active": true,
            "note": null,
            "name": "Ada"
        });
        let row = Row::from_json_object(value.as_object().unwrap());
        assert_eq!(row.get("id"), Some("7"));
        assert_eq!(row.get("score"), Some("2.5"));
        assert_eq!(row.get("whole"), Some("3"));
        assert_eq!(row.get("active"), Some("true"));
        assert_eq!(row.get("note"), Some("null"));
        assert_eq!(row.get("name"), Some("Ada"));
    }

    #[test]
    fn json_objects_keep_source_key_order() {
        let value: Value =
            serde_json::from_str(r#"{"zip": "K1A", "name": "Ada", "email": "a@b.co"}"#).unwrap();
        let row = Row::from_json_object(value.as_object().unwrap());
        let keys: Vec<&str> = row.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["zip", "name", "email"]);
    }

    #[test]
    fn serializes_as_flat_map_in_order() {
        let row: Row = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"b":"2","a":"1"}"#);
    }
}
