//! Logging utilities for ddl_schema
//!
//! This module provides logging setup and configuration.

use std::fs::File;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Parse a configured level name, defaulting to INFO
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn build_filter(level: Level) -> Result<EnvFilter> {
    let directive = format!("ddl_schema={}", level)
        .parse::<Directive>()
        .map_err(|e| Error::ConfigError(format!("Invalid log directive: {}", e)))?;

    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Initialize logging based on configuration
pub fn init_logging(config: &Option<LoggingConfig>) -> Result<()> {
    let config = match config {
        Some(cfg) => cfg,
        None => return Ok(()),
    };

    let env_filter = build_filter(parse_level(&config.level))?;
    let json = config.format.to_lowercase() == "json";

    // A log file takes precedence over stdout
    if let Some(file_path) = &config.file {
        if let Some(parent) = Path::new(file_path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(file_path)?;

        if json {
            let subscriber = fmt::Subscriber::builder()
                .json()
                .with_env_filter(env_filter)
                .with_writer(file)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::Unknown(e.to_string()))?;
        } else {
            let subscriber = fmt::Subscriber::builder()
                .with_ansi(false)
                .with_env_filter(env_filter)
                .with_writer(file)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::Unknown(e.to_string()))?;
        }
    } else if config.stdout {
        if json {
            let subscriber = fmt::Subscriber::builder()
                .json()
                .with_env_filter(env_filter)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::Unknown(e.to_string()))?;
        } else {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::Unknown(e.to_string()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn no_config_is_a_no_op() {
        assert!(init_logging(&None).is_ok());
    }

    #[test]
    fn file_logging_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("logs").join("extract.log");
        let config = LoggingConfig {
            level: "debug".to_string(),
            file: Some(log_path.to_string_lossy().into_owned()),
            format: "text".to_string(),
            stdout: false,
        };

        // Another test may already own the global subscriber; the file is created either way.
        let _ = init_logging(&Some(config));
        assert!(log_path.exists());
    }
}
