use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;

use super::position::{Position, render_position};
use crate::engine::errors::{DecodeError, DecodeErrorKind};
use crate::engine::types::value_kind;

pub type ObjectNode = IndexMap<String, Node>;
pub type ArrayNode = BTreeMap<usize, Node>;

/// What to do with array slots no column filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HolePolicy {
    /// An unfilled slot is a decode error.
    #[default]
    Reject,
    /// Unfilled slots are removed and the array compacted.
    Drop,
}

/// Decoded structure before array slots are compacted.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Object(ObjectNode),
    Array(ArrayNode),
    Leaf(Value),
}

impl Node {
    pub fn empty_object() -> Self {
        Node::Object(IndexMap::new())
    }

    pub fn empty_array() -> Self {
        Node::Array(BTreeMap::new())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Object(_) => "object",
            Node::Array(_) => "array",
            Node::Leaf(value) => value_kind(value),
        }
    }

    /// On a hole, returns the trail to it from the innermost step outwards.
    fn into_value(self, policy: HolePolicy) -> Result<Value, Vec<Position<'static>>> {
        match self {
            Node::Leaf(value) => Ok(value),
            Node::Object(fields) => {
                let mut out = Map::with_capacity(fields.len());
                for (field, child) in fields {
                    match child.into_value(policy) {
                        Ok(value) => {
                            out.insert(field, value);
                        }
                        Err(mut trail) => {
                            trail.push(Position::Field(Cow::Owned(field)));
                            return Err(trail);
                        }
                    }
                }
                Ok(Value::Object(out))
            }
            Node::Array(slots) => {
                let mut out = Vec::with_capacity(slots.len());
                for (idx, child) in slots {
                    if policy == HolePolicy::Reject && idx != out.len() {
                        return Err(vec![Position::Index(out.len())]);
                    }
                    match child.into_value(policy) {
                        Ok(value) => out.push(value),
                        Err(mut trail) => {
                            trail.push(Position::Index(idx));
                            return Err(trail);
                        }
                    }
                }
                Ok(Value::Array(out))
            }
        }
    }
}

/// Target that one or more columns are decoded into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseDocument {
    root: ObjectNode,
}

impl SparseDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &ObjectNode {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut ObjectNode {
        &mut self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Compacts every array according to `policy` and returns the document.
    pub fn finish(self, policy: HolePolicy) -> Result<Value, DecodeError> {
        Node::Object(self.root).into_value(policy).map_err(|mut trail| {
            trail.reverse();
            let position = render_position(&trail);
            DecodeError::detached(
                DecodeErrorKind::Hole {
                    position: position.clone(),
                },
                position,
            )
        })
    }
}
