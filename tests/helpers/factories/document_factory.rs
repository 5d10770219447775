use serde_json::{Map, Value};

/// Builds documents by assigning values at dotted paths.
pub struct DocumentFactory {
    root: Map<String, Value>,
}

impl DocumentFactory {
    pub fn new() -> Self {
        Self { root: Map::new() }
    }

    /// Creates intermediate objects as needed; replaces non-objects on the way.
    pub fn with(mut self, path: &str, value: Value) -> Self {
        let parts: Vec<&str> = path.split('.').collect();
        let Some((last, parents)) = parts.split_last() else {
            return self;
        };

        let mut current = &mut self.root;
        for part in parents {
            let slot = current
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            current = match slot {
                Value::Object(fields) => fields,
                _ => unreachable!("slot was just made an object"),
            };
        }
        current.insert(last.to_string(), value);
        self
    }

    pub fn create(self) -> Value {
        Value::Object(self.root)
    }
}
