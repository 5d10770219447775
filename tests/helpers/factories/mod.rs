pub mod column_factory;
pub mod column_set_factory;
pub mod document_factory;

#[cfg(test)]
mod document_factory_test;

pub use column_factory::ColumnFactory;
pub use column_set_factory::ColumnSetFactory;
pub use document_factory::DocumentFactory;
