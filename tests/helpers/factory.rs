pub use super::factories::{ColumnFactory, ColumnSetFactory, DocumentFactory};

pub struct Factory;

impl Factory {
    pub fn column() -> ColumnFactory {
        ColumnFactory::new()
    }

    pub fn column_set() -> ColumnSetFactory {
        ColumnSetFactory::new()
    }

    pub fn document() -> DocumentFactory {
        DocumentFactory::new()
    }
}
