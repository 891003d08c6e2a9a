//! Error types for ddl_schema
//!
//! Parsing itself never fails; these cover the layers around it.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for ddl_schema operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ddl_schema
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cannot read dump {}", path.display())]
    DumpRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Pattern error: {0}")]
    PatternError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Convert Serde JSON errors to ddl_schema errors
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert Serde YAML errors to ddl_schema errors
impl From<serde_yaml::Error> for Error {
    fn from(error: serde_yaml::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert TOML deserialization errors to ddl_schema errors
impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::ConfigError(error.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(error: toml::ser::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(error: regex::Error) -> Self {
        Error::PatternError(error.to_string())
    }
}
