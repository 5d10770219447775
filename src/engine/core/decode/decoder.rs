use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::trace;

use super::node::{ArrayNode, HolePolicy, Node, ObjectNode, SparseDocument};
use super::position::{Position, render_position};
use crate::engine::core::arr_info::{Marker, SpannedToken, Token, tokenize};
use crate::engine::core::cursor::{Cursor, CursorSnapshot, Focus};
use crate::engine::errors::{DecodeError, DecodeErrorKind};
use crate::engine::types::ColumnSet;
use crate::shared::config::CONFIG;
use crate::shared::path::segments;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub max_depth: usize,
    pub holes: HolePolicy,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: CONFIG.codec.max_depth,
            holes: HolePolicy::Reject,
        }
    }
}

/// Rebuilds the structure a column's values came from.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnDecoder {
    options: DecodeOptions,
}

impl ColumnDecoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decodes one column into a fresh document rooted at the path's first segment.
    pub fn decode(&self, path: &str, values: &[Value], arr_info: &str) -> Result<Value, DecodeError> {
        let mut document = SparseDocument::new();
        self.decode_into(path, values, arr_info, &mut document)?;
        document
            .finish(self.options.holes)
            .inspect_err(DecodeError::log_error)
    }

    /// Decodes one column into `into`, reusing objects and arrays already there.
    pub fn decode_into(
        &self,
        path: &str,
        values: &[Value],
        arr_info: &str,
        into: &mut SparseDocument,
    ) -> Result<(), DecodeError> {
        trace!(target: "doc_columns::decode", path, arr_info, values = values.len(), "Decoding column");
        run(
            path,
            values,
            arr_info,
            self.options.max_depth,
            into.root_mut(),
            None,
        )
        .inspect_err(DecodeError::log_error)
    }

    /// Merges every column that holds values back into one document.
    ///
    /// Columns are merged in discovery order, so an object's fields come
    /// back in the order their paths were first met anywhere in the
    /// document. Values compare equal to the original; serialized field
    /// order may differ.
    pub fn reconstruct(&self, columns: &ColumnSet) -> Result<Value, DecodeError> {
        let mut document = SparseDocument::new();
        for (path, column) in columns.field_columns() {
            if column.has_values() {
                self.decode_into(path, &column.values, &column.arr_info, &mut document)?;
            }
        }
        document
            .finish(self.options.holes)
            .inspect_err(DecodeError::log_error)
    }

    /// Raw marker sequence implied by each of `value_count` values.
    pub fn expand_markers(
        &self,
        path: &str,
        value_count: usize,
        arr_info: &str,
    ) -> Result<Vec<Vec<Marker>>, DecodeError> {
        let placeholders = vec![Value::Null; value_count];
        let mut scratch = ObjectNode::new();
        let mut markers = Vec::with_capacity(value_count);
        run(
            path,
            &placeholders,
            arr_info,
            self.options.max_depth,
            &mut scratch,
            Some(&mut markers),
        )?;
        Ok(markers)
    }
}

fn run(
    path: &str,
    values: &[Value],
    arr_info: &str,
    max_depth: usize,
    into: &mut ObjectNode,
    trace: Option<&mut Vec<Vec<Marker>>>,
) -> Result<(), DecodeError> {
    let parts = segments(path);
    let tokens = tokenize(arr_info).map_err(|err| DecodeError {
        path: Cursor::new("path", &parts, false).snapshot_joined("", ".", ""),
        arr_info: CursorSnapshot::new(
            "arrInfo",
            arr_info.to_string(),
            Focus::Span {
                offset: err.offset,
                width: 1,
            },
            None,
        ),
        values: Cursor::new("values", values, true).snapshot_joined("[", ", ", "]"),
        output_pos: render_position(&[]),
        context: BTreeMap::new(),
        kind: DecodeErrorKind::Syntax {
            offset: err.offset,
            detail: err.detail,
        },
    })?;

    let mut state = DecodeState {
        path: Cursor::new("path", &parts, false),
        tokens: Cursor::new("arrInfo", &tokens, false),
        values: Cursor::new("values", values, true),
        arr_info,
        output_pos: Vec::new(),
        context: Vec::new(),
        max_depth,
        trace,
    };
    state.decode_root(into)
}

/// Recursive-descent state over the three input cursors.
///
/// `context` mirrors the walker's marker stack so that every leaf can be
/// traced back to the exact raw markers the encoder recorded for it.
struct DecodeState<'s> {
    path: Cursor<'s, &'s str>,
    tokens: Cursor<'s, SpannedToken>,
    values: Cursor<'s, Value>,
    arr_info: &'s str,
    output_pos: Vec<Position<'s>>,
    context: Vec<Marker>,
    max_depth: usize,
    trace: Option<&'s mut Vec<Vec<Marker>>>,
}

impl<'s> DecodeState<'s> {
    fn decode_root(&mut self, into: &mut ObjectNode) -> Result<(), DecodeError> {
        if self.tokens.is_empty() {
            if self.values.len() != 1 {
                return Err(self.error(DecodeErrorKind::ValueCountMismatch {
                    count: self.values.len(),
                }));
            }
            self.decode_nested_path(into)?;
        } else {
            if self.values.is_empty() {
                return Err(self.error(DecodeErrorKind::ValuesExhausted));
            }
            self.decode_obj(into)?;
        }

        if self.values.has_more() {
            return Err(self.error(DecodeErrorKind::ValuesRemaining {
                remaining: self.values.remaining(),
            }));
        }
        if self.tokens.has_more() {
            return Err(self.error(DecodeErrorKind::TokensRemaining {
                remaining: self.tokens.remaining(),
            }));
        }
        Ok(())
    }

    /// Walks the rest of the path through objects and assigns one value at its end.
    fn decode_nested_path(&mut self, into: &mut ObjectNode) -> Result<(), DecodeError> {
        let field = self.consume_path_part()?;
        if self.path.has_more() {
            let slot = into
                .entry(field.to_string())
                .or_insert_with(Node::empty_object);
            let child = self.expect_object(slot)?;
            self.enter(Marker::EnterObject)?;
            self.decode_nested_path(child)?;
            self.leave();
        } else {
            self.assign_field(into, field)?;
        }
        self.unconsume_path_part();
        Ok(())
    }

    fn decode_obj(&mut self, into: &mut ObjectNode) -> Result<(), DecodeError> {
        let field = self.consume_path_part()?;
        let token = self.consume_token();
        match token {
            Token::EnterObject => {
                let slot = into
                    .entry(field.to_string())
                    .or_insert_with(Node::empty_object);
                let child = self.expect_object(slot)?;
                self.enter(Marker::EnterObject)?;
                self.decode_obj(child)?;
                self.leave();
            }
            Token::EnterArray { start } => {
                let slot = into
                    .entry(field.to_string())
                    .or_insert_with(Node::empty_array);
                let child = self.expect_array(slot)?;
                self.enter(Marker::EnterArray(start))?;
                self.decode_arr(child, start)?;
                self.leave();
            }
            Token::Leaf { repeat } => {
                if self.path.has_more() {
                    return Err(self.error(DecodeErrorKind::RedundantObjectMarker));
                }
                if repeat > 0 {
                    return Err(self.unexpected(token, "object"));
                }
                self.assign_field(into, field)?;
            }
            Token::CloseArray | Token::Skip(_) => return Err(self.unexpected(token, "object")),
        }
        self.unconsume_path_part();
        Ok(())
    }

    fn decode_arr(&mut self, into: &mut ArrayNode, start: usize) -> Result<(), DecodeError> {
        let mut index = start;
        let mut inserted = false;
        self.output_pos.push(Position::Index(index));

        while !self.done()? {
            self.set_index(index);
            let token = self.consume_token();
            match token {
                Token::Leaf { repeat } => {
                    inserted = true;
                    for _ in 0..=repeat {
                        self.set_index(index);
                        self.insert_leaf(into, index)?;
                        index = self.advance(index, 1)?;
                    }
                    if self.tokens.peek().is_some_and(|next| next.token.is_leaf()) {
                        return Err(self.error(DecodeErrorKind::UnencodedLeafRun));
                    }
                }
                Token::EnterObject => {
                    inserted = true;
                    let slot = into.entry(index).or_insert_with(Node::empty_object);
                    let child = self.expect_object(slot)?;
                    self.enter(Marker::EnterObject)?;
                    self.decode_obj(child)?;
                    self.leave();
                    index = self.advance(index, 1)?;
                }
                Token::EnterArray { start: nested } => {
                    inserted = true;
                    let slot = into.entry(index).or_insert_with(Node::empty_array);
                    let child = self.expect_array(slot)?;
                    self.enter(Marker::EnterArray(nested))?;
                    self.decode_arr(child, nested)?;
                    self.leave();
                    index = self.advance(index, 1)?;
                }
                Token::Skip(count) => {
                    if !inserted {
                        return Err(self.error(DecodeErrorKind::SkipWithoutInsert));
                    }
                    inserted = false;
                    index = self.advance(index, count)?;
                }
                Token::CloseArray => {
                    if !inserted {
                        return Err(self.error(DecodeErrorKind::CloseWithoutInsert));
                    }
                    break;
                }
            }
        }

        self.output_pos.pop();
        Ok(())
    }

    fn insert_leaf(&mut self, into: &mut ArrayNode, index: usize) -> Result<(), DecodeError> {
        if self.path.has_more() {
            let slot = into.entry(index).or_insert_with(Node::empty_object);
            let child = self.expect_object(slot)?;
            self.enter(Marker::EnterObject)?;
            self.decode_nested_path(child)?;
            self.leave();
            return Ok(());
        }

        if let Some(existing) = into.get(&index) {
            return Err(self
                .error(DecodeErrorKind::OverwriteElement { index })
                .with_context("existing", existing.kind()));
        }
        let value = self.consume_value()?;
        self.record_leaf();
        into.insert(index, Node::Leaf(value.clone()));
        Ok(())
    }

    fn assign_field(&mut self, into: &mut ObjectNode, field: &str) -> Result<(), DecodeError> {
        if let Some(existing) = into.get(field) {
            return Err(self
                .error(DecodeErrorKind::OverwriteField {
                    field: field.to_string(),
                })
                .with_context("existing", existing.kind()));
        }
        let value = self.consume_value()?;
        self.record_leaf();
        into.insert(field.to_string(), Node::Leaf(value.clone()));
        Ok(())
    }

    /// True once every value is placed; tokens left over at that point are an error.
    fn done(&self) -> Result<bool, DecodeError> {
        if self.values.has_more() {
            return Ok(false);
        }
        if self.tokens.has_more() {
            return Err(self.error(DecodeErrorKind::TokensRemaining {
                remaining: self.tokens.remaining(),
            }));
        }
        Ok(true)
    }

    /// Past the end of arrInfo every token is an implicit leaf.
    fn consume_token(&mut self) -> Token {
        match self.tokens.consume() {
            Some(spanned) => spanned.token,
            None => Token::Leaf { repeat: 0 },
        }
    }

    fn consume_value(&mut self) -> Result<&'s Value, DecodeError> {
        match self.values.consume() {
            Some(value) => Ok(value),
            None => Err(self.error(DecodeErrorKind::ValuesExhausted)),
        }
    }

    fn consume_path_part(&mut self) -> Result<&'s str, DecodeError> {
        let Some(&part) = self.path.consume() else {
            return Err(self.error(DecodeErrorKind::PathExhausted));
        };
        self.output_pos.push(Position::Field(Cow::Borrowed(part)));
        Ok(part)
    }

    fn unconsume_path_part(&mut self) {
        self.path.unconsume();
        self.output_pos.pop();
    }

    fn enter(&mut self, marker: Marker) -> Result<(), DecodeError> {
        if self.context.len() >= self.max_depth {
            return Err(self.error(DecodeErrorKind::DepthLimit {
                limit: self.max_depth,
            }));
        }
        self.context.push(marker);
        Ok(())
    }

    fn leave(&mut self) {
        self.context.pop();
    }

    fn set_index(&mut self, index: usize) {
        if let Some(Position::Index(slot)) = self.output_pos.last_mut() {
            *slot = index;
        }
        if let Some(top) = self.context.last_mut() {
            *top = Marker::EnterArray(index);
        }
    }

    fn advance(&self, index: usize, by: usize) -> Result<usize, DecodeError> {
        index.checked_add(by).ok_or_else(|| {
            self.error(DecodeErrorKind::IndexOverflow)
                .with_context("index", index)
                .with_context("advance", by)
        })
    }

    fn record_leaf(&mut self) {
        if let Some(trace) = self.trace.as_deref_mut() {
            let mut markers = Vec::with_capacity(self.context.len() + 1);
            markers.extend_from_slice(&self.context);
            markers.push(Marker::Leaf);
            trace.push(markers);
        }
    }

    fn expect_object<'n>(&self, slot: &'n mut Node) -> Result<&'n mut ObjectNode, DecodeError> {
        match slot {
            Node::Object(fields) => Ok(fields),
            other => Err(self.error(DecodeErrorKind::NotAnObject {
                found: other.kind(),
            })),
        }
    }

    fn expect_array<'n>(&self, slot: &'n mut Node) -> Result<&'n mut ArrayNode, DecodeError> {
        match slot {
            Node::Array(slots) => Ok(slots),
            other => Err(self.error(DecodeErrorKind::NotAnArray {
                found: other.kind(),
            })),
        }
    }

    fn unexpected(&self, token: Token, frame: &'static str) -> DecodeError {
        self.error(DecodeErrorKind::UnexpectedToken {
            token: token.to_string(),
            frame,
        })
    }

    fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError {
            kind,
            path: self.path.snapshot_joined("", ".", ""),
            arr_info: self.tokens.snapshot_in_source(self.arr_info),
            values: self.values.snapshot_joined("[", ", ", "]"),
            output_pos: render_position(&self.output_pos),
            context: BTreeMap::new(),
        }
    }
}
