use crate::engine::types::{Column, ColumnSet};
use crate::shared::path::ROOT_PATH;

use super::column_factory::ColumnFactory;

/// Column sets assembled by hand, starting with the root marker column.
pub struct ColumnSetFactory {
    columns: Vec<(String, Column)>,
}

impl ColumnSetFactory {
    pub fn new() -> Self {
        let root = ColumnFactory::new()
            .with_values(vec![])
            .with_sub_objects()
            .create();
        Self {
            columns: vec![(ROOT_PATH.to_string(), root)],
        }
    }

    pub fn without_root(mut self) -> Self {
        self.columns.retain(|(path, _)| path != ROOT_PATH);
        self
    }

    pub fn with_column(mut self, path: &str, column: Column) -> Self {
        self.columns.push((path.to_string(), column));
        self
    }

    pub fn create(self) -> ColumnSet {
        self.columns.into_iter().collect()
    }
}
