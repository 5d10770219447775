//! Convenience entry points reading their options from `CONFIG`.

use serde_json::Value;

use crate::engine::core::arr_info::ArrInfoCompressor;
use crate::engine::core::column::ColumnEncoder;
use crate::engine::core::decode::ColumnDecoder;
use crate::engine::core::read::projection::{ProjectionEngine, ProjectionOutcome};
use crate::engine::errors::{CodecError, DecodeError, EncodeError};
use crate::engine::types::ColumnSet;

/// Encodes one document into its per-path columns.
pub fn encode(document: &Value) -> Result<ColumnSet, EncodeError> {
    ColumnEncoder::default().encode(document)
}

/// Encodes independent documents on the rayon pool, keeping input order.
pub fn encode_many(documents: &[Value]) -> Vec<Result<ColumnSet, EncodeError>> {
    ColumnEncoder::default().encode_many(documents)
}

/// Rebuilds the sub-structure one column describes, rooted at the path's first segment.
pub fn decode(path: &str, values: &[Value], arr_info: &str) -> Result<Value, DecodeError> {
    ColumnDecoder::default().decode(path, values, arr_info)
}

/// Rebuilds a whole document from its columns.
///
/// Field order follows column discovery order, not each object's own order.
pub fn reconstruct(columns: &ColumnSet) -> Result<Value, DecodeError> {
    ColumnDecoder::default().reconstruct(columns)
}

pub fn answer_projection(path: &str, columns: &ColumnSet) -> Result<ProjectionOutcome, DecodeError> {
    ProjectionEngine::new(columns).answer(path)
}

/// Expands an arrInfo back to raw markers and compresses it again.
///
/// A canonical arrInfo comes back unchanged.
pub fn recompress(path: &str, value_count: usize, arr_info: &str) -> Result<String, CodecError> {
    let markers = ColumnDecoder::default().expand_markers(path, value_count, arr_info)?;
    Ok(ArrInfoCompressor::compress(path, &markers)?)
}
