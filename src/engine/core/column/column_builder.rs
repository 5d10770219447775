use indexmap::IndexMap;
use serde_json::{Value, map};
use std::iter::Enumerate;
use std::slice;

use crate::engine::core::arr_info::Marker;
use crate::engine::errors::EncodeError;
use crate::engine::types::{ColumnStats, value_kind};
use crate::shared::path::{ROOT_PATH, child_path, is_valid_field_name};

/// Everything the walk learned about one dotted path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathInfo {
    pub values: Vec<Value>,
    /// One marker sequence per value, root to leaf.
    pub raw_markers: Vec<Vec<Marker>>,
    pub stats: ColumnStats,
    pub has_non_empty_sub_objects: bool,
}

pub type PathInfos = IndexMap<String, PathInfo>;

enum Frame<'d> {
    Object {
        prefix: Option<String>,
        fields: map::Iter<'d>,
        pushed_marker: bool,
    },
    Array {
        path: String,
        items: Enumerate<slice::Iter<'d, Value>>,
        depth: usize,
        saw_object: bool,
    },
}

enum Step<'d> {
    Field {
        path: String,
        value: &'d Value,
    },
    Element {
        path: String,
        index: usize,
        depth: usize,
        value: &'d Value,
    },
    Finished,
}

/// Depth-first walk of one document over an explicit frame stack.
///
/// `context` always mirrors the open frames below the root: one
/// `EnterObject` per nested object and one `EnterArray(index)` per array,
/// the latter updated to the element currently visited.
pub struct ColumnBuilder {
    max_depth: usize,
    infos: PathInfos,
    context: Vec<Marker>,
}

impl ColumnBuilder {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            infos: IndexMap::new(),
            context: Vec::new(),
        }
    }

    pub fn build(mut self, document: &Value) -> Result<PathInfos, EncodeError> {
        let Value::Object(root) = document else {
            return Err(EncodeError::RootNotObject {
                found: value_kind(document),
            });
        };

        self.info_mut(ROOT_PATH).has_non_empty_sub_objects = true;

        let mut stack = vec![Frame::Object {
            prefix: None,
            fields: root.iter(),
            pushed_marker: false,
        }];

        while let Some(frame) = stack.last_mut() {
            match Self::next_step(frame)? {
                Step::Field { path, value } => {
                    self.info_mut(&path).stats.n_seen += 1;
                    self.handle_elem(&mut stack, path, 0, value)?;
                }
                Step::Element {
                    path,
                    index,
                    depth,
                    value,
                } => {
                    if let Some(top) = self.context.last_mut() {
                        *top = Marker::EnterArray(index);
                    }
                    self.handle_elem(&mut stack, path, depth, value)?;
                }
                Step::Finished => self.finish_frame(&mut stack),
            }
        }

        Ok(self.infos)
    }

    fn next_step<'d>(frame: &mut Frame<'d>) -> Result<Step<'d>, EncodeError> {
        match frame {
            Frame::Object { prefix, fields, .. } => match fields.next() {
                Some((field, value)) => {
                    if !is_valid_field_name(field) {
                        return Err(EncodeError::InvalidFieldName {
                            path: prefix.clone().unwrap_or_default(),
                            field: field.clone(),
                        });
                    }
                    Ok(Step::Field {
                        path: child_path(prefix.as_deref(), field),
                        value,
                    })
                }
                None => Ok(Step::Finished),
            },
            Frame::Array {
                path, items, depth, ..
            } => match items.next() {
                Some((index, value)) => Ok(Step::Element {
                    path: path.clone(),
                    index,
                    depth: *depth,
                    value,
                }),
                None => Ok(Step::Finished),
            },
        }
    }

    /// `depth` is the number of arrays between the owning field and `value`.
    fn handle_elem<'d>(
        &mut self,
        stack: &mut Vec<Frame<'d>>,
        path: String,
        depth: usize,
        value: &'d Value,
    ) -> Result<(), EncodeError> {
        match value {
            Value::Array(items) if !items.is_empty() => {
                self.check_depth(stack, &path)?;
                if depth > 0 {
                    self.info_mut(&path).stats.n_directly_nested_arrays += 1;
                }
                self.context.push(Marker::EnterArray(0));
                stack.push(Frame::Array {
                    path,
                    items: items.iter().enumerate(),
                    depth: depth + 1,
                    saw_object: false,
                });
            }
            Value::Object(fields) if !fields.is_empty() => {
                self.check_depth(stack, &path)?;
                mark_object_element(stack);
                let info = self.info_mut(&path);
                info.stats.n_sub_objects += 1;
                info.has_non_empty_sub_objects = true;
                self.context.push(Marker::EnterObject);
                stack.push(Frame::Object {
                    prefix: Some(path),
                    fields: fields.iter(),
                    pushed_marker: true,
                });
            }
            Value::Object(_) => {
                mark_object_element(stack);
                let stats = &mut self.info_mut(&path).stats;
                stats.n_sub_objects += 1;
                stats.children_must_be_sparse = true;
                self.push_leaf(&path, value);
            }
            Value::Array(_) => {
                self.info_mut(&path).stats.children_must_be_sparse = true;
                self.push_leaf(&path, value);
            }
            _ => {
                // scalars inside arrays vanish from a child projection, field values do not
                if depth == 0 {
                    self.info_mut(&path).stats.children_must_be_sparse = true;
                }
                self.push_leaf(&path, value);
            }
        }
        Ok(())
    }

    fn finish_frame(&mut self, stack: &mut Vec<Frame<'_>>) {
        match stack.pop() {
            Some(Frame::Object { pushed_marker, .. }) => {
                if pushed_marker {
                    self.context.pop();
                }
            }
            Some(Frame::Array {
                path, saw_object, ..
            }) => {
                self.context.pop();
                if saw_object {
                    mark_object_element(stack);
                } else {
                    self.info_mut(&path).stats.children_must_be_sparse = true;
                }
            }
            None => {}
        }
    }

    fn check_depth(&self, stack: &[Frame<'_>], path: &str) -> Result<(), EncodeError> {
        if stack.len() > self.max_depth {
            return Err(EncodeError::DepthLimit {
                path: path.to_string(),
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn push_leaf(&mut self, path: &str, value: &Value) {
        let mut markers = Vec::with_capacity(self.context.len() + 1);
        markers.extend_from_slice(&self.context);
        markers.push(Marker::Leaf);

        let info = self.info_mut(path);
        info.values.push(value.clone());
        info.raw_markers.push(markers);
    }

    fn info_mut(&mut self, path: &str) -> &mut PathInfo {
        self.infos.entry(path.to_string()).or_default()
    }
}

/// Records that the array frame on top of the stack holds an object.
fn mark_object_element(stack: &mut [Frame<'_>]) {
    if let Some(Frame::Array { saw_object, .. }) = stack.last_mut() {
        *saw_object = true;
    }
}
