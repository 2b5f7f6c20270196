//! Error types for the course site core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or validation error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Course record could not be encoded or decoded.
    #[error("Record error in {path}: {message}")]
    Codec { path: PathBuf, message: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new record codec error.
    pub fn codec(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Codec {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CoreError::config("style_sheet cannot be empty");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("style_sheet"));
    }

    #[test]
    fn test_config_error_keeps_source() {
        let io_err = std::io::Error::other("disk gone");
        let err = CoreError::config_with_source("failed to read", io_err);
        let source = std::error::Error::source(&err).expect("source");
        assert!(source.to_string().contains("disk gone"));
    }

    #[test]
    fn test_codec_error() {
        let err = CoreError::codec("courses/cse219.txt", "unsupported record format");
        assert!(err.to_string().contains("Record error"));
        assert!(err.to_string().contains("courses/cse219.txt"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CoreError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }
}
