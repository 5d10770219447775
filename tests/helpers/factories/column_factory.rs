use serde_json::Value;

use crate::engine::types::Column;

pub struct ColumnFactory {
    values: Vec<Value>,
    arr_info: String,
    is_sparse: bool,
    has_non_empty_sub_objects: bool,
}

impl ColumnFactory {
    pub fn new() -> Self {
        Self {
            values: vec![Value::from("value")],
            arr_info: String::new(),
            is_sparse: false,
            has_non_empty_sub_objects: false,
        }
    }

    pub fn with_values(mut self, values: Vec<Value>) -> Self {
        self.values = values;
        self
    }

    pub fn with_arr_info(mut self, arr_info: &str) -> Self {
        self.arr_info = arr_info.to_string();
        self
    }

    pub fn sparse(mut self) -> Self {
        self.is_sparse = true;
        self
    }

    pub fn with_sub_objects(mut self) -> Self {
        self.has_non_empty_sub_objects = true;
        self
    }

    pub fn create(self) -> Column {
        Column::new(self.values, self.arr_info)
            .with_sparse(self.is_sparse)
            .with_sub_objects(self.has_non_empty_sub_objects)
    }
}
