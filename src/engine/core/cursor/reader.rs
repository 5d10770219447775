use serde_json::Value;

use super::snapshot::{CursorSnapshot, Focus};

/// Renders one cursor item inside a diagnostic row.
pub trait RenderItem {
    fn render_item(&self) -> String;
}

impl RenderItem for &str {
    fn render_item(&self) -> String {
        (*self).to_string()
    }
}

impl RenderItem for Value {
    fn render_item(&self) -> String {
        self.to_string()
    }
}

/// Items that know where they came from in a source string.
pub trait Spanned {
    fn span(&self) -> (usize, usize);
}

/// Indexed reader over a borrowed slice that remembers the last position read.
///
/// With `print_past_last_read` the diagnostic points at the next item to be
/// read instead of the last one that was.
#[derive(Debug, Clone)]
pub struct Cursor<'a, T> {
    name: &'static str,
    items: &'a [T],
    index: usize,
    last_read: Option<usize>,
    print_past_last_read: bool,
}

impl<'a, T> Cursor<'a, T> {
    pub fn new(name: &'static str, items: &'a [T], print_past_last_read: bool) -> Self {
        Self {
            name,
            items,
            index: 0,
            last_read: None,
            print_past_last_read,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.index)
    }

    pub fn has_more(&self) -> bool {
        self.remaining() > 0
    }

    pub fn peek(&self) -> Option<&'a T> {
        self.items.get(self.index)
    }

    pub fn consume(&mut self) -> Option<&'a T> {
        let item = self.items.get(self.index)?;
        self.last_read = Some(self.index);
        self.index += 1;
        Some(item)
    }

    pub fn unconsume(&mut self) {
        self.index = self.index.saturating_sub(1);
        self.last_read = self.index.checked_sub(1);
    }

    fn focus_index(&self) -> Result<usize, &'static str> {
        if self.print_past_last_read {
            if self.index >= self.items.len() {
                return Err("(cursor past end)");
            }
            Ok(self.index)
        } else {
            self.last_read.ok_or("(nothing read yet)")
        }
    }
}

impl<T: RenderItem> Cursor<'_, T> {
    /// Snapshot rendering every item between `open` and `close`, joined by `sep`.
    pub fn snapshot_joined(&self, open: &str, sep: &str, close: &str) -> CursorSnapshot {
        let focus_index = self.focus_index();
        let mut row = String::from(open);
        let mut focus = Focus::Note("(cursor past end)");

        for (idx, item) in self.items.iter().enumerate() {
            if idx > 0 {
                row.push_str(sep);
            }
            let rendered = item.render_item();
            if focus_index == Ok(idx) {
                focus = Focus::Span {
                    offset: row.chars().count(),
                    width: rendered.chars().count().max(1),
                };
            }
            row.push_str(&rendered);
        }
        row.push_str(close);

        if let Err(note) = focus_index {
            focus = Focus::Note(note);
        }

        CursorSnapshot::new(self.name, row, focus, Some(self.index))
    }
}

impl<T: Spanned> Cursor<'_, T> {
    /// Snapshot pointing into the source text the items were parsed from.
    pub fn snapshot_in_source(&self, source: &str) -> CursorSnapshot {
        let focus = match self.focus_index() {
            Ok(idx) => match self.items.get(idx) {
                Some(item) => {
                    let (offset, width) = item.span();
                    Focus::Span {
                        offset,
                        width: width.max(1),
                    }
                }
                None => Focus::Note("(cursor past end)"),
            },
            Err(note) => Focus::Note(note),
        };

        CursorSnapshot::new(self.name, source.to_string(), focus, Some(self.index))
    }
}
