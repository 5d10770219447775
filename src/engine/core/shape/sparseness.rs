use std::collections::HashMap;

use crate::engine::core::column::{PathInfo, PathInfos};
use crate::engine::errors::EncodeError;
use crate::shared::path::parent_path;

/// Lazily decides, per path, whether its column can have skipped occurrences.
///
/// A path is sparse when its parent is sparse, when some occurrence of the
/// parent cannot carry children, or when the parent held more objects than
/// this path was seen in. Top-level paths are always dense.
pub struct SparsenessAnalyzer<'a> {
    infos: &'a PathInfos,
    memo: HashMap<&'a str, bool>,
}

impl<'a> SparsenessAnalyzer<'a> {
    pub fn new(infos: &'a PathInfos) -> Self {
        Self {
            infos,
            memo: HashMap::with_capacity(infos.len()),
        }
    }

    pub fn is_sparse(&mut self, path: &str) -> Result<bool, EncodeError> {
        let infos = self.infos;
        let Some((key, _)) = infos.get_key_value(path) else {
            return Err(invariant(path, "path was never walked"));
        };
        let path = key.as_str();

        let mut pending = Vec::new();
        let mut current = Some(path);
        while let Some(p) = current {
            if self.memo.contains_key(p) {
                break;
            }
            pending.push(p);
            current = parent_path(p);
        }

        while let Some(p) = pending.pop() {
            let sparse = self.resolve(p)?;
            self.memo.insert(p, sparse);
        }

        self.memo
            .get(path)
            .copied()
            .ok_or_else(|| invariant(path, "sparseness left unresolved"))
    }

    /// Expects the parent (if any) to be memoised already.
    fn resolve(&self, path: &'a str) -> Result<bool, EncodeError> {
        let Some(parent) = parent_path(path) else {
            return Ok(false);
        };
        let parent_sparse = self
            .memo
            .get(parent)
            .copied()
            .ok_or_else(|| invariant(path, "parent resolved out of order"))?;
        let parent_info = self.lookup(parent)?;
        let info = self.lookup(path)?;

        Ok(parent_sparse
            || parent_info.stats.children_must_be_sparse
            || info.stats.n_seen != parent_info.stats.n_sub_objects)
    }

    fn lookup(&self, path: &str) -> Result<&'a PathInfo, EncodeError> {
        let infos = self.infos;
        infos
            .get(path)
            .ok_or_else(|| invariant(path, "missing parent path"))
    }
}

fn invariant(path: &str, detail: &str) -> EncodeError {
    EncodeError::Invariant {
        path: path.to_string(),
        detail: detail.to_string(),
    }
}
