//! Error types for verdant_core.
//!
//! The simulation itself has no recoverable failures; errors only come from
//! loading and validating configuration.

use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File system errors
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A parameter is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    #[must_use]
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
