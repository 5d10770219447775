use std::borrow::Cow;
use std::fmt::Write;

/// One step of the output trail: a field name or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position<'a> {
    Field(Cow<'a, str>),
    Index(usize),
}

/// Renders `a[1].b` style positions; the empty trail is `<root>`.
pub fn render_position(steps: &[Position<'_>]) -> String {
    if steps.is_empty() {
        return "<root>".to_string();
    }
    let mut out = String::new();
    for step in steps {
        match step {
            Position::Field(field) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(field);
            }
            Position::Index(idx) => {
                let _ = write!(out, "[{idx}]");
            }
        }
    }
    out
}
