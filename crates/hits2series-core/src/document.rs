//! Flattened document model for raw search hits.
//!
//! A hit's `_source` is an arbitrarily nested JSON object. Field lookups
//! by configured name have to work against dotted paths, so the source is
//! flattened once at ingest into a flat `key -> FieldValue` mapping and
//! every lookup after that is a plain map access.

use std::collections::HashMap;

use serde_json::Value as JsonValue;

/// A single flattened field value.
///
/// Anything that is not a scalar survives flattening as either more
/// dotted keys (objects) or a comma-joined string (arrays).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl FieldValue {
    /// Numeric view of the value. Only `Number` qualifies; a numeric
    /// string does not.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

/// One raw search hit: flattened source fields plus the optional
/// highlight payload that arrived with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDocument {
    source: HashMap<String, FieldValue>,
    highlight: HashMap<String, FieldValue>,
}

impl RawDocument {
    /// Build a document from a hit's `_source` and `highlight` JSON
    /// payloads, flattening both.
    pub fn from_hit(source: &JsonValue, highlight: Option<&JsonValue>) -> Self {
        Self {
            source: flatten_json(source),
            highlight: highlight.map(flatten_json).unwrap_or_default(),
        }
    }

    /// Look up a source field by flattened name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.source.get(name)
    }

    /// Numeric value of a source field, if the field exists and holds a
    /// number.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(FieldValue::as_number)
    }

    /// Highlight fragment for a field, if the engine produced one.
    pub fn highlight(&self, name: &str) -> Option<&FieldValue> {
        self.highlight.get(name)
    }

    /// True when the field is present and non-null, regardless of type.
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).map(|v| !v.is_null()).unwrap_or(false)
    }
}

#[cfg(test)]
impl RawDocument {
    /// Test constructor taking already-flat fields.
    pub fn from_fields(fields: Vec<(&str, FieldValue)>) -> Self {
        Self {
            source: fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            highlight: HashMap::new(),
        }
    }
}

/// Flatten a JSON value into dotted-path keys.
///
/// Nested objects contribute `outer.inner` keys; arrays collapse into a
/// single comma-joined string. A non-object root flattens to the empty
/// key.
pub fn flatten_json(value: &JsonValue) -> HashMap<String, FieldValue> {
    let mut flat = HashMap::new();
    flatten_into(value, "", &mut flat);
    flat
}

fn flatten_into(value: &JsonValue, prefix: &str, flat: &mut HashMap<String, FieldValue>) {
    match value {
        JsonValue::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(val, &path, flat);
            }
        }
        JsonValue::Array(items) => {
            let joined = items
                .iter()
                .map(scalar_to_string)
                .collect::<Vec<_>>()
                .join(",");
            flat.insert(prefix.to_string(), FieldValue::Text(joined));
        }
        other => {
            flat.insert(prefix.to_string(), scalar_to_field(other));
        }
    }
}

fn scalar_to_field(value: &JsonValue) -> FieldValue {
    match value {
        JsonValue::Number(n) => n
            .as_f64()
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Null),
        JsonValue::String(s) => FieldValue::Text(s.clone()),
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        _ => FieldValue::Null,
    }
}

fn scalar_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
