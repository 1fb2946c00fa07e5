use std::collections::HashMap;

use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// A single field value carried by a record.
///
/// Values are primitives only; anything richer coming from a remote source is
/// coerced to its string form before it reaches the encoder.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(OffsetDateTime),
    Null,
}

/// One source data item to be exported: a mapping from field name to value.
pub type Record = HashMap<String, FieldValue>;

impl FieldValue {
    /// Default stringification applied when a column carries no formatter.
    ///
    /// Timestamps render as RFC 3339 (a machine-readable ISO-8601 full
    /// timestamp), never as a locale-formatted string.
    pub fn to_field_string(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Int(value) => value.to_string(),
            FieldValue::Float(value) => value.to_string(),
            FieldValue::Bool(value) => value.to_string(),
            FieldValue::Timestamp(value) => value
                .format(&Rfc3339)
                .unwrap_or_else(|_| value.to_string()),
            FieldValue::Null => String::new(),
        }
    }

    /// Returns `true` for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(value) => FieldValue::Bool(*value),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    FieldValue::Int(value)
                } else if let Some(value) = number.as_f64() {
                    FieldValue::Float(value)
                } else {
                    FieldValue::Text(number.to_string())
                }
            }
            Value::String(text) => FieldValue::Text(text.clone()),
            // Non-primitive values are coerced to their JSON string form.
            other => FieldValue::Text(other.to_string()),
        }
    }
}

/// Converts a JSON object into a [`Record`].
///
/// Non-object values yield an empty record.
pub fn record_from_json(value: &Value) -> Record {
    match value.as_object() {
        Some(object) => object
            .iter()
            .map(|(key, value)| (key.clone(), FieldValue::from(value)))
            .collect(),
        None => Record::new(),
    }
}

/// Converts a JSON array of objects into records, the usual shape of a
/// paginated listing response. A single object yields one record.
pub fn records_from_json(value: &Value) -> Vec<Record> {
    match value {
        Value::Array(items) => items.iter().map(record_from_json).collect(),
        Value::Object(_) => vec![record_from_json(value)],
        _ => Vec::new(),
    }
}
