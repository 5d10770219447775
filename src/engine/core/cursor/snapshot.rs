use std::fmt;

/// Where a snapshot points inside its rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    Span { offset: usize, width: usize },
    Note(&'static str),
}

/// Frozen view of a cursor at the moment a decode failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSnapshot {
    pub name: &'static str,
    pub row: String,
    pub focus: Focus,
    pub position: Option<usize>,
}

impl CursorSnapshot {
    pub fn new(name: &'static str, row: String, focus: Focus, position: Option<usize>) -> Self {
        Self {
            name,
            row,
            focus,
            position,
        }
    }

    /// Placeholder for failures raised after every cursor has been dropped.
    pub fn detached(name: &'static str) -> Self {
        Self::new(name, String::new(), Focus::Note("(not available)"), None)
    }

    /// Row plus a caret line, each line prefixed by `indent`.
    pub fn render(&self, indent: &str) -> String {
        match &self.focus {
            Focus::Span { offset, width } => format!(
                "{indent}{}\n{indent}{}^{}",
                self.row,
                " ".repeat(*offset),
                "~".repeat(width.saturating_sub(1))
            ),
            Focus::Note(note) if self.row.is_empty() => format!("{indent}{note}"),
            Focus::Note(note) => format!("{indent}{} {note}", self.row),
        }
    }
}

impl fmt::Display for CursorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{}@{}", self.name, pos),
            None => write!(f, "{}@-", self.name),
        }
    }
}
