use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Walk bookkeeping for one path, used to derive sparseness. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnStats {
    /// Times the path was addressed as a field of some object instance.
    pub n_seen: usize,
    /// Times the path held an object (empty or not).
    pub n_sub_objects: usize,
    /// Non-empty arrays found directly inside another array at this path.
    pub n_directly_nested_arrays: usize,
    /// Some occurrence of this path cannot carry child fields.
    pub children_must_be_sparse: bool,
}

/// One encoded dotted path of one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub values: Vec<Value>,
    pub arr_info: String,
    pub is_sparse: bool,
    pub has_non_empty_sub_objects: bool,
    #[serde(skip)]
    pub stats: ColumnStats,
}

impl Column {
    pub fn new(values: Vec<Value>, arr_info: impl Into<String>) -> Self {
        Self {
            values,
            arr_info: arr_info.into(),
            ..Self::default()
        }
    }

    pub fn with_sparse(mut self, is_sparse: bool) -> Self {
        self.is_sparse = is_sparse;
        self
    }

    pub fn with_sub_objects(mut self, has_non_empty_sub_objects: bool) -> Self {
        self.has_non_empty_sub_objects = has_non_empty_sub_objects;
        self
    }

    pub fn has_values(&self) -> bool {
        !self.values.is_empty()
    }

    /// A sparse column whose only value is `[]` still answers unambiguously.
    pub fn is_trivially_sparse(&self) -> bool {
        matches!(self.values.as_slice(), [Value::Array(items)] if items.is_empty())
    }
}
