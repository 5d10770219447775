use rayon::prelude::*;
use serde_json::Value;
use tracing::debug;

use crate::engine::core::arr_info::ArrInfoCompressor;
use crate::engine::core::column::column_builder::ColumnBuilder;
use crate::engine::core::shape::SparsenessAnalyzer;
use crate::engine::errors::EncodeError;
use crate::engine::types::{Column, ColumnSet};
use crate::shared::config::CONFIG;

/// Walks a document, then finalizes every discovered path into a column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnEncoder {
    max_depth: usize,
}

impl Default for ColumnEncoder {
    fn default() -> Self {
        Self::new(CONFIG.codec.max_depth)
    }
}

impl ColumnEncoder {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn encode(&self, document: &Value) -> Result<ColumnSet, EncodeError> {
        let infos = ColumnBuilder::new(self.max_depth).build(document)?;

        let sparse_flags = {
            let mut analyzer = SparsenessAnalyzer::new(&infos);
            infos
                .keys()
                .map(|path| analyzer.is_sparse(path))
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut columns = ColumnSet::new();
        let mut value_count = 0;
        for ((path, info), is_sparse) in infos.into_iter().zip(sparse_flags) {
            let arr_info = ArrInfoCompressor::compress(&path, &info.raw_markers)?;
            if info.stats.n_directly_nested_arrays > 0 {
                debug!(
                    target: "doc_columns::encode",
                    path = %path,
                    nested_arrays = info.stats.n_directly_nested_arrays,
                    is_sparse,
                    "Column holds arrays nested directly in arrays"
                );
            }
            value_count += info.values.len();
            columns.insert(
                path,
                Column {
                    values: info.values,
                    arr_info,
                    is_sparse,
                    has_non_empty_sub_objects: info.has_non_empty_sub_objects,
                    stats: info.stats,
                },
            );
        }

        debug!(
            target: "doc_columns::encode",
            paths = columns.len(),
            values = value_count,
            "Encoded document into columns"
        );
        Ok(columns)
    }

    /// Encodes independent documents in parallel; results keep input order.
    pub fn encode_many(&self, documents: &[Value]) -> Vec<Result<ColumnSet, EncodeError>> {
        debug!(
            target: "doc_columns::encode",
            documents = documents.len(),
            "Encoding batch"
        );
        documents.par_iter().map(|doc| self.encode(doc)).collect()
    }
}
