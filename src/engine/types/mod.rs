pub mod column;
pub mod column_set;

pub use column::{Column, ColumnStats};
pub use column_set::ColumnSet;

use serde_json::Value;

/// Short name of a value's kind for diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Empty objects and empty arrays are stored as values, never descended into.
pub fn is_leaf(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => true,
    }
}
