use std::path::PathBuf;

use thiserror::Error;

/// Errors from configuration loading and required-key lookups.
///
/// Missing keys are a normal outcome of [`LayeredConfig::get_string`]
/// (`None`), never an error; [`ConfigError::MissingKey`] exists for callers
/// that cannot proceed without a value.
///
/// [`LayeredConfig::get_string`]: crate::LayeredConfig::get_string
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed.
    #[error("failed to parse configuration {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: toml::de::Error,
    },

    /// No source defines the requested key.
    #[error("configuration key not defined by any source: {0}")]
    MissingKey(String),
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
