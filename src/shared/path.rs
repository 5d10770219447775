/// Path of the implicit root object. NUL never appears in a field name.
pub const ROOT_PATH: &str = "\u{0}";

pub const SEPARATOR: char = '.';

/// Path with its last `.segment` removed; `None` for top-level fields.
pub fn parent_path(path: &str) -> Option<&str> {
    path.rfind(SEPARATOR).map(|idx| &path[..idx])
}

pub fn is_top_level(path: &str) -> bool {
    !path.contains(SEPARATOR)
}

pub fn segments(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).collect()
}

pub fn child_path(parent: Option<&str>, field: &str) -> String {
    match parent {
        Some(prefix) => {
            let mut path = String::with_capacity(prefix.len() + 1 + field.len());
            path.push_str(prefix);
            path.push(SEPARATOR);
            path.push_str(field);
            path
        }
        None => field.to_string(),
    }
}

/// Field names that would make a dotted path ambiguous.
pub fn is_valid_field_name(field: &str) -> bool {
    !field.contains(SEPARATOR) && !field.contains('\u{0}')
}
