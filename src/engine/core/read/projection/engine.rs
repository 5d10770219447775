use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::engine::core::decode::{ColumnDecoder, DecodeOptions, HolePolicy};
use crate::engine::core::read::projection::inclusion::project_inclusion;
use crate::engine::core::read::projection::outcome::{FetchReason, ProjectionOutcome};
use crate::engine::errors::DecodeError;
use crate::engine::types::{Column, ColumnSet};
use crate::shared::config::CONFIG;
use crate::shared::path::parent_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionOptions {
    /// Answer a sparse column whose only value is `[]` instead of fetching.
    pub answer_trivial_sparse: bool,
    pub max_depth: usize,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            answer_trivial_sparse: CONFIG.projection.answer_trivial_sparse,
            max_depth: CONFIG.codec.max_depth,
        }
    }
}

/// Answers single-path inclusion projections from one document's columns.
///
/// The column set is only read, so one engine (or many) can share it.
pub struct ProjectionEngine<'c> {
    columns: &'c ColumnSet,
    options: ProjectionOptions,
}

impl<'c> ProjectionEngine<'c> {
    pub fn new(columns: &'c ColumnSet) -> Self {
        Self::with_options(columns, ProjectionOptions::default())
    }

    pub fn with_options(columns: &'c ColumnSet, options: ProjectionOptions) -> Self {
        Self { columns, options }
    }

    /// Finds the closest column at or above `path` and answers from it.
    pub fn answer(&self, path: &str) -> Result<ProjectionOutcome, DecodeError> {
        let mut consulted = Vec::new();
        let mut current = path;

        loop {
            if let Some(column) = self.columns.get(current) {
                return self.answer_from(path, current, column, consulted);
            }
            match parent_path(current) {
                Some(parent) => {
                    consulted.push(parent.to_string());
                    current = parent;
                }
                None => return Ok(self.answer_absent(path, consulted)),
            }
        }
    }

    /// No column anywhere on the path: the field never appeared.
    fn answer_absent(&self, path: &str, consulted: Vec<String>) -> ProjectionOutcome {
        if !self.columns.has_field_columns() {
            return self.needs_fetch(path, path, FetchReason::NoDataForPath, consulted);
        }
        debug!(
            target: "doc_columns::projection",
            path,
            "Field absent from every column, answering empty projection"
        );
        ProjectionOutcome::Answered {
            answer: Value::Object(Map::new()),
            consulted,
        }
    }

    fn answer_from(
        &self,
        target: &str,
        source: &str,
        column: &Column,
        consulted: Vec<String>,
    ) -> Result<ProjectionOutcome, DecodeError> {
        if column.has_non_empty_sub_objects {
            return Ok(self.needs_fetch(target, source, FetchReason::SubObjectMarker, consulted));
        }
        if column.is_sparse
            && !(self.options.answer_trivial_sparse && column.is_trivially_sparse())
        {
            return Ok(self.needs_fetch(target, source, FetchReason::SparseDataMarker, consulted));
        }

        let decoder = ColumnDecoder::new(DecodeOptions {
            max_depth: self.options.max_depth,
            holes: HolePolicy::Drop,
        });
        let decoded = decoder.decode(source, &column.values, &column.arr_info)?;
        let answer = project_inclusion(&decoded, target);

        debug!(
            target: "doc_columns::projection",
            path = target,
            column = source,
            consulted = consulted.len(),
            "Answered projection from columns"
        );
        Ok(ProjectionOutcome::Answered { answer, consulted })
    }

    fn needs_fetch(
        &self,
        target: &str,
        source: &str,
        reason: FetchReason,
        consulted: Vec<String>,
    ) -> ProjectionOutcome {
        info!(
            target: "doc_columns::projection",
            path = target,
            column = source,
            reason = %reason,
            "Projection needs a row fetch"
        );
        ProjectionOutcome::NeedsFetch { reason, consulted }
    }
}
