pub mod global;
pub mod model;

pub use global::CONFIG;
pub use model::{CodecConfig, LoggingConfig, ProjectionConfig, Settings, load_settings};
