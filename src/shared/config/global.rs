use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::warn;

use crate::shared::config::model::{Settings, load_settings};

pub static CONFIG: Lazy<Arc<Settings>> = Lazy::new(|| {
    Arc::new(load_settings().unwrap_or_else(|err| {
        warn!(target: "doc_columns::config", error = %err, "Falling back to default settings");
        Settings::default()
    }))
});
