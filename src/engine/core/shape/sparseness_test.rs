use crate::engine::core::column::{ColumnBuilder, PathInfos};
use crate::engine::core::shape::SparsenessAnalyzer;
use crate::engine::errors::EncodeError;
use crate::shared::path::ROOT_PATH;
use serde_json::{Value, json};

fn walk(document: Value) -> PathInfos {
    ColumnBuilder::new(100).build(&document).unwrap()
}

#[test]
fn top_level_paths_are_dense() {
    let infos = walk(json!({"a": 1, "b": [1, {"c": 1}]}));
    let mut analyzer = SparsenessAnalyzer::new(&infos);

    assert!(!analyzer.is_sparse(ROOT_PATH).unwrap());
    assert!(!analyzer.is_sparse("a").unwrap());
    assert!(!analyzer.is_sparse("b").unwrap());
}

#[test]
fn field_present_in_every_object_is_dense() {
    let infos = walk(json!({"a": [{"b": 1}, {"b": 2}]}));
    let mut analyzer = SparsenessAnalyzer::new(&infos);

    assert!(!analyzer.is_sparse("a.b").unwrap());
}

#[test]
fn field_missing_from_some_object_is_sparse() {
    let infos = walk(json!({"a": [{"b": 1}, {"c": 2}]}));
    let mut analyzer = SparsenessAnalyzer::new(&infos);

    assert!(analyzer.is_sparse("a.b").unwrap());
    assert!(analyzer.is_sparse("a.c").unwrap());
}

#[test]
fn heterogeneous_parent_forces_children_sparse() {
    let infos = walk(json!({"x": [{"a": 5}, {"a": {"b": 1}}]}));
    let mut analyzer = SparsenessAnalyzer::new(&infos);

    assert!(!analyzer.is_sparse("x.a").unwrap());
    assert!(analyzer.is_sparse("x.a.b").unwrap());
}

#[test]
fn sparseness_is_inherited_downward() {
    let infos = walk(json!({"a": [{"b": {"c": 1}}, {"d": 1}]}));
    let mut analyzer = SparsenessAnalyzer::new(&infos);

    // resolve the deepest path first to exercise the upward walk
    assert!(analyzer.is_sparse("a.b.c").unwrap());
    assert!(analyzer.is_sparse("a.b").unwrap());
    assert!(!analyzer.is_sparse("a").unwrap());
}

#[test]
fn directly_nested_arrays_alone_stay_dense() {
    let infos = walk(json!({"a": {"b": [[{"c": 1}], [{"c": 2}]]}}));
    let mut analyzer = SparsenessAnalyzer::new(&infos);

    assert_eq!(infos["a.b"].stats.n_directly_nested_arrays, 2);
    assert!(!analyzer.is_sparse("a.b.c").unwrap());
}

#[test]
fn scalar_only_nested_array_forces_sparse() {
    let infos = walk(json!({"a": {"b": [[1, 2], [{"c": 1}], 2]}}));
    let mut analyzer = SparsenessAnalyzer::new(&infos);

    assert!(analyzer.is_sparse("a.b.c").unwrap());
}

#[test]
fn unknown_path_is_an_invariant_error() {
    let infos = walk(json!({"a": 1}));
    let mut analyzer = SparsenessAnalyzer::new(&infos);

    let err = analyzer.is_sparse("zzz").unwrap_err();
    assert!(matches!(err, EncodeError::Invariant { .. }));
}
