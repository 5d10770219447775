use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::engine::types::column::Column;
use crate::shared::path::ROOT_PATH;

/// All columns of one document, in path discovery order.
///
/// Immutable once produced by the encoder; share it behind an `Arc` for
/// concurrent projection readers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSet {
    columns: IndexMap<String, Column>,
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, column: Column) -> Option<Column> {
        self.columns.insert(path.into(), column)
    }

    pub fn get(&self, path: &str) -> Option<&Column> {
        self.columns.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.columns.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(path, column)| (path.as_str(), column))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Columns for real fields, skipping the root marker.
    pub fn field_columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.iter().filter(|(path, _)| *path != ROOT_PATH)
    }

    pub fn has_field_columns(&self) -> bool {
        self.field_columns().next().is_some()
    }
}

impl FromIterator<(String, Column)> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = (String, Column)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
