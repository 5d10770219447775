use serde_json::{Map, Value};

use crate::shared::path::segments;

/// Inclusion projection of one dotted path over a whole document.
///
/// Objects keep only the next field on the path, arrays keep their projected
/// objects and arrays and drop scalars, and the value at the last segment is
/// kept whole. A scalar met before the last segment drops out entirely.
pub fn project_inclusion(document: &Value, path: &str) -> Value {
    let parts = segments(path);
    match document {
        Value::Object(fields) => Value::Object(project_fields(fields, &parts)),
        _ => Value::Object(Map::new()),
    }
}

fn project_fields(fields: &Map<String, Value>, parts: &[&str]) -> Map<String, Value> {
    let mut out = Map::new();
    let Some((head, rest)) = parts.split_first() else {
        return out;
    };
    let Some(value) = fields.get(*head) else {
        return out;
    };

    if rest.is_empty() {
        out.insert((*head).to_string(), value.clone());
    } else if let Some(projected) = project_value(value, rest) {
        out.insert((*head).to_string(), projected);
    }
    out
}

fn project_value(value: &Value, rest: &[&str]) -> Option<Value> {
    match value {
        Value::Object(fields) => Some(Value::Object(project_fields(fields, rest))),
        Value::Array(items) => Some(Value::Array(
            items
                .iter()
                .filter_map(|item| project_value(item, rest))
                .collect(),
        )),
        _ => None,
    }
}
