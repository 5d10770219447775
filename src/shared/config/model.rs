use serde::Deserialize;
use std::env;

/// Default bound on object/array nesting for both encode and decode.
pub const DEFAULT_MAX_DEPTH: usize = 100;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub codec: CodecConfig,
    pub projection: ProjectionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub max_depth: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Answer a sparse column directly when it holds a single empty array.
    ///
    /// The answer omits parent occurrences that lack the field.
    pub answer_trivial_sparse: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            answer_trivial_sparse: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_dir: Option<String>,
    pub stdout_level: String,
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            stdout_level: "info".to_string(),
            file_level: "debug".to_string(),
        }
    }
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("DOC_COLUMNS_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

/// Loads settings from `config_path` (extension optional); a missing file yields defaults.
pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
