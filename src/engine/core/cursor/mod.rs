pub mod reader;
pub mod snapshot;

pub use reader::{Cursor, RenderItem, Spanned};
pub use snapshot::{CursorSnapshot, Focus};
