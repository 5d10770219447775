use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, error};

use crate::engine::core::cursor::CursorSnapshot;

/// Errors that abort encoding a document. Nothing is emitted on failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("Document root must be an object, found {found}")]
    RootNotObject { found: &'static str },

    #[error("Field name {field:?} under {path:?} cannot be addressed by a dotted path")]
    InvalidFieldName { path: String, field: String },

    #[error("Nesting deeper than {limit} levels at path {path:?}")]
    DepthLimit { path: String, limit: usize },

    #[error("Encoder invariant violated at path {path:?}: {detail}")]
    Invariant { path: String, detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    #[error("Malformed arrInfo at byte {offset}: {detail}")]
    Syntax { offset: usize, detail: String },

    #[error("Unexpected token `{token}` in {frame} frame")]
    UnexpectedToken { token: String, frame: &'static str },

    #[error("Leaf before the path was fully consumed (redundant `{{`)")]
    RedundantObjectMarker,

    #[error("Expected an object at the current position, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Expected an array at the current position, found {found}")]
    NotAnArray { found: &'static str },

    #[error("Field {field:?} is already populated")]
    OverwriteField { field: String },

    #[error("Array slot {index} is already populated")]
    OverwriteElement { index: usize },

    #[error("Ran out of values before the arrInfo was fully consumed")]
    ValuesExhausted,

    #[error("Ran out of arrInfo with {remaining} value(s) left")]
    ValuesRemaining { remaining: usize },

    #[error("Values consumed but arrInfo still has {remaining} token(s)")]
    TokensRemaining { remaining: usize },

    #[error("Empty arrInfo requires exactly one value, found {count}")]
    ValueCountMismatch { count: usize },

    #[error("Path has no segment left to consume")]
    PathExhausted,

    #[error("Index skip without a preceding insertion")]
    SkipWithoutInsert,

    #[error("Array closed before any insertion")]
    CloseWithoutInsert,

    #[error("Consecutive leaf tokens must be run-length encoded")]
    UnencodedLeafRun,

    #[error("Nesting deeper than {limit} levels")]
    DepthLimit { limit: usize },

    #[error("Array index overflow")]
    IndexOverflow,

    #[error("Unfilled array slot at {position}")]
    Hole { position: String },
}

/// A decode failure together with where each input cursor stood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (at {output_pos}; {path}, {arr_info}, {values})")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub path: CursorSnapshot,
    pub arr_info: CursorSnapshot,
    pub values: CursorSnapshot,
    pub output_pos: String,
    pub context: BTreeMap<String, String>,
}

impl DecodeError {
    /// Error raised outside a running decoder (e.g. while finalizing a merged tree).
    pub fn detached(kind: DecodeErrorKind, output_pos: impl Into<String>) -> Self {
        Self {
            kind,
            path: CursorSnapshot::detached("path"),
            arr_info: CursorSnapshot::detached("arrInfo"),
            values: CursorSnapshot::detached("values"),
            output_pos: output_pos.into(),
            context: BTreeMap::new(),
        }
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Multi-line diagnostic with a caret under each cursor position.
    pub fn report(&self) -> String {
        let mut out = format!("{}\n  output position: {}\n", self.kind, self.output_pos);
        for snapshot in [&self.path, &self.arr_info, &self.values] {
            out.push_str(&format!("  {}:\n", snapshot.name));
            out.push_str(&snapshot.render("    "));
            out.push('\n');
        }
        if !self.context.is_empty() {
            out.push_str("  context:\n");
            for (key, value) in &self.context {
                out.push_str(&format!("    {key} = {value}\n"));
            }
        }
        out
    }

    pub fn log_error(&self) {
        error!(target: "doc_columns::decode", kind = %self.kind, at = %self.output_pos, "Column decode failed");
        debug!(target: "doc_columns::decode", "Column decode error details:\n{}", self.report());
    }
}

impl From<DecodeErrorKind> for DecodeError {
    fn from(kind: DecodeErrorKind) -> Self {
        DecodeError::detached(kind, "<root>")
    }
}

/// Either side of the codec failing, for operations that encode and decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Encode failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),
}
