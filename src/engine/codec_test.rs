use crate::engine::codec::{answer_projection, decode, encode, encode_many, reconstruct, recompress};
use crate::engine::core::read::projection::FetchReason;
use crate::engine::errors::{CodecError, DecodeErrorKind, EncodeError};
use crate::test_helpers::factory::Factory;
use serde_json::json;

#[test]
fn encode_then_reconstruct_restores_document() {
    crate::logging::init_for_tests();
    let doc = json!({
        "a": {"b": [[1, 2], [{}], 2]},
        "c": [{"d": "x"}, {"e": null}, []],
        "f": true
    });
    let columns = encode(&doc).unwrap();
    assert_eq!(reconstruct(&columns).unwrap(), doc);
}

#[test]
fn reconstruct_of_empty_document() {
    let columns = encode(&json!({})).unwrap();
    assert_eq!(reconstruct(&columns).unwrap(), json!({}));
}

#[test]
fn reconstruct_from_factory_columns() {
    let columns = Factory::column_set()
        .with_column("a.b", Factory::column().with_values(vec![json!(1), json!(2)]).with_arr_info("[").create())
        .with_column("c", Factory::column().with_values(vec![json!("x")]).create())
        .create();
    assert_eq!(
        reconstruct(&columns).unwrap(),
        json!({"a": [{"b": 1}, {"b": 2}], "c": "x"})
    );
}

#[test]
fn reconstruct_reports_conflicting_columns() {
    let columns = Factory::column_set()
        .with_column("a", Factory::column().with_values(vec![json!(1)]).create())
        .with_column("a.b", Factory::column().with_values(vec![json!(2)]).create())
        .create();
    let err = reconstruct(&columns).unwrap_err();
    assert!(matches!(err.kind, DecodeErrorKind::NotAnObject { .. }));
}

#[test]
fn decode_single_column() {
    let value = decode("a.b", &[json!(1), json!(2)], "[").unwrap();
    assert_eq!(value, json!({"a": [{"b": 1}, {"b": 2}]}));
}

#[test]
fn encode_many_keeps_order_and_errors() {
    let docs = vec![json!({"a": 1}), json!([1]), json!({"b": [2]})];
    let results = encode_many(&docs);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().get("a").unwrap().values, vec![json!(1)]);
    assert_eq!(
        results[1].as_ref().unwrap_err(),
        &EncodeError::RootNotObject { found: "array" }
    );
    assert_eq!(results[2].as_ref().unwrap().get("b").unwrap().arr_info, "[");
}

#[test]
fn answer_projection_through_entry_point() {
    let columns = encode(&json!({"a": [{"b": 1}, {"b": 2}], "z": 0})).unwrap();
    let outcome = answer_projection("a.b", &columns).unwrap();
    assert_eq!(outcome.answer(), Some(&json!({"a": [{"b": 1}, {"b": 2}]})));
}

#[test]
fn recompress_is_identity_on_canonical_arr_info() {
    for (path, count, arr_info) in [("a.b", 4, "{[[|1][|]"), ("a", 3, "["), ("a.b.c", 1, "[{[")] {
        assert_eq!(recompress(path, count, arr_info).unwrap(), arr_info);
    }
}

#[test]
fn recompress_surfaces_decode_failure() {
    let err = recompress("a", 1, "[]").unwrap_err();
    assert!(matches!(err, CodecError::Decode(_)));
}


#[test]
fn reconstruct_document_built_by_paths() {
    let doc = Factory::document()
        .with("a.b", json!([1, {"x": null}, []]))
        .with("a.c.d", json!({}))
        .with("e", json!("tail"))
        .create();
    let columns = encode(&doc).unwrap();
    assert_eq!(reconstruct(&columns).unwrap(), doc);
}

#[test]
fn default_options_fetch_lone_empty_array_in_sparse_column() {
    let doc = json!({"a": [{"b": []}, {}]});
    let columns = encode(&doc).unwrap();
    let column = columns.get("a.b").unwrap();
    assert!(column.is_sparse);
    assert!(column.is_trivially_sparse());

    let outcome = answer_projection("a.b", &columns).unwrap();
    assert_eq!(outcome.fetch_reason(), Some(FetchReason::SparseDataMarker));
}

#[test]
fn reconstruct_orders_fields_by_column_discovery() {
    let doc = json!({"a": [{"y": 1}, {"x": 1, "y": 2}]});
    let rebuilt = reconstruct(&encode(&doc).unwrap()).unwrap();

    assert_eq!(rebuilt, doc);
    let second: Vec<&str> = rebuilt["a"][1]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(second, ["y", "x"]);
}
