//! FILENAME: core/engine/src/record.rs
//! PURPOSE: Defines the fundamental data structures for a personnel record.
//! CONTEXT: This file contains the `Record` struct and `FieldValue` enum.
//! Records are JSON-backed objects fetched from the remote store. The same
//! logical field may be stored under a camelCase display key or a snake_case
//! storage key depending on which system wrote it, so every read goes through
//! the dual-key accessor (`value`): display key first, storage key second,
//! empty value last. Downstream code never sees a missing field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Converts a camelCase logical key to its snake_case storage equivalent.
/// An underscore is inserted before each ASCII uppercase letter, which is
/// then lowercased: `hourlyWage` -> `hourly_wage`.
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// A field value after dual-key resolution.
/// Absent and JSON-null fields both resolve to `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl FieldValue {
    /// Converts a raw JSON value into a field value.
    /// Arrays and objects are rendered as their JSON text (they only occur in
    /// legacy payload blobs and are treated as opaque text by the grid).
    fn from_json(raw: &Value) -> FieldValue {
        match raw {
            Value::Null => FieldValue::Empty,
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_f64() {
                Some(f) => FieldValue::Number(f),
                None => FieldValue::Text(n.to_string()),
            },
            Value::String(s) => FieldValue::Text(s.clone()),
            other => FieldValue::Text(other.to_string()),
        }
    }

    /// Returns the display value as a String.
    /// Numbers are formatted without unnecessary decimal places; `Empty`
    /// renders as the empty string, never as a literal "null".
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            FieldValue::Text(s) => s.clone(),
            FieldValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
        }
    }

    /// Numeric view of the value. Numeric-looking text parses too, since
    /// legacy imports stored wages and ages as strings.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }
}

/// A personnel record: staff member, resume, hiring application, or factory.
///
/// The record is a thin wrapper over the JSON object the remote store
/// returned. It is never mutated by the grid pipeline; filtering, sorting,
/// and aggregation derive views from immutable record lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record { fields: Map::new() }
    }

    /// Wraps a JSON object. Returns `None` for non-object values.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Record { fields }),
            _ => None,
        }
    }

    /// Builder-style field insert, used by stores and test fixtures.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Sets a field in place.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Merges every field of `patch` into this record (update semantics).
    pub fn merge(&mut self, patch: &Record) {
        for (key, value) in &patch.fields {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Raw access to a single stored key, without dual-key fallback.
    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Resolves a logical field through the dual-key rule:
    /// the camelCase display key first, then the derived snake_case storage
    /// key, finally `FieldValue::Empty`. JSON null counts as absent at both
    /// keys. Never panics.
    pub fn value(&self, logical_key: &str) -> FieldValue {
        if let Some(raw) = self.fields.get(logical_key) {
            if !raw.is_null() {
                return FieldValue::from_json(raw);
            }
        }
        let snake = to_snake_case(logical_key);
        if snake != logical_key {
            if let Some(raw) = self.fields.get(&snake) {
                if !raw.is_null() {
                    return FieldValue::from_json(raw);
                }
            }
        }
        FieldValue::Empty
    }

    /// Display text of a logical field (`""` when absent).
    pub fn text(&self, logical_key: &str) -> String {
        self.value(logical_key).display_value()
    }

    /// Numeric view of a logical field.
    pub fn number(&self, logical_key: &str) -> Option<f64> {
        self.value(logical_key).as_number()
    }

    /// The record identity, coerced to a string. Selection state and delete
    /// operations key on this value, so it must be stable across refetches.
    pub fn id(&self) -> String {
        self.text("id")
    }
}
