pub mod column_builder;
pub mod column_encoder;

pub use column_builder::{ColumnBuilder, PathInfo, PathInfos};
pub use column_encoder::ColumnEncoder;
