use crate::shared::path::{
    ROOT_PATH, child_path, is_top_level, is_valid_field_name, parent_path, segments,
};

#[test]
fn parent_of_nested_path_drops_last_segment() {
    assert_eq!(parent_path("a.b.c"), Some("a.b"));
    assert_eq!(parent_path("a.b"), Some("a"));
    assert_eq!(parent_path("a"), None);
    assert_eq!(parent_path(ROOT_PATH), None);
}

#[test]
fn top_level_detection() {
    assert!(is_top_level("a"));
    assert!(is_top_level(ROOT_PATH));
    assert!(!is_top_level("a.b"));
}

#[test]
fn child_path_joins_with_separator() {
    assert_eq!(child_path(None, "a"), "a");
    assert_eq!(child_path(Some("a"), "b"), "a.b");
    assert_eq!(child_path(Some("a.b"), "c"), "a.b.c");
}

#[test]
fn segments_split_on_dots() {
    assert_eq!(segments("a.b.c"), vec!["a", "b", "c"]);
    assert_eq!(segments("a"), vec!["a"]);
}

#[test]
fn rejects_separator_and_nul_in_field_names() {
    assert!(is_valid_field_name("plain"));
    assert!(is_valid_field_name(""));
    assert!(!is_valid_field_name("a.b"));
    assert!(!is_valid_field_name("a\u{0}"));
}
