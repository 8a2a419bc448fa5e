//! Scroller configuration errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`ScrollerConfig`](crate::ScrollerConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema
    #[error("Failed to parse scroller config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but make no sense together
    #[error("Invalid scroller config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
