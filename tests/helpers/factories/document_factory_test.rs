use super::document_factory::DocumentFactory;
use serde_json::json;

#[test]
fn builds_nested_objects_from_paths() {
    let document = DocumentFactory::new()
        .with("a.b.c", json!(1))
        .with("a.x", json!([1, 2]))
        .with("d", json!(null))
        .create();

    assert_eq!(
        document,
        json!({"a": {"b": {"c": 1}, "x": [1, 2]}, "d": null})
    );
}

#[test]
fn replaces_scalars_on_the_way() {
    let document = DocumentFactory::new()
        .with("a", json!(5))
        .with("a.b", json!(true))
        .create();

    assert_eq!(document, json!({"a": {"b": true}}));
}
