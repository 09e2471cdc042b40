//! Logging utilities for the apidef CLI
//!
//! This module provides:
//! - Structured logging setup on stderr
//! - Multiple output formats (compact, full, JSON)
//! - Performance timing spans

use crate::config;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::str::FromStr;
use tracing::{field, Span};
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Output format: compact, full, json
    pub format: LogFormat,
    /// Colorize log lines when stderr is a terminal
    pub ansi: bool,
    /// Include thread IDs
    pub thread_ids: bool,
    /// Include file and line numbers
    pub source_location: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact format for everyday use
    Compact,
    /// Full format with all details
    Full,
    /// JSON structured format
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "full" => Ok(LogFormat::Full),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("invalid log format '{}'", s)),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            ansi: true,
            thread_ids: false,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let mut config = Self::default();

        match verbosity {
            0 => {
                config.level = "warn".to_string();
            }
            1 => {
                config.level = "info".to_string();
            }
            2 => {
                config.level = "debug".to_string();
                config.source_location = true;
            }
            _ => {
                config.level = "trace".to_string();
                config.format = LogFormat::Full;
                config.source_location = true;
                config.thread_ids = true;
            }
        }

        config
    }

    /// Restrict logging to plain error lines
    pub fn quiet(&mut self) {
        self.level = "error".to_string();
        self.ansi = false;
    }

    /// Fill in settings from the configuration file where no flag was given
    pub fn merge_with_file(&mut self, file: &config::LoggingConfig, verbosity: u8) {
        if verbosity == 0 {
            if let Some(level) = &file.level {
                self.level = level.clone();
            }
        }
        if let Some(format) = &file.format {
            match format.parse() {
                Ok(format) => self.format = format,
                Err(e) => eprintln!("Warning: {}, using default", e),
            }
        }
    }

    /// Apply environment overrides
    pub fn merge_with_env(&mut self) {
        // RUST_LOG takes precedence
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            self.level = rust_log;
        }

        if let Ok(format) = std::env::var("APIDEF_LOG_FORMAT") {
            match format.parse() {
                Ok(format) => self.format = format,
                Err(e) => eprintln!("Warning: {}, using default", e),
            }
        }
    }
}

/// Initialize the global logging system
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::other(format!("Invalid log filter '{}': {}", config.level, e)))?;
    let ansi = config.ansi && std::io::stderr().is_terminal();

    // Use different subscriber based on format to avoid type conflicts
    let installed = match config.format {
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(ansi)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .compact()
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(false)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .json()
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Full => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(ansi)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    };
    installed.map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!(config = ?config, "Logging system initialized");
    Ok(())
}

/// Create a span for a timed operation
pub fn create_operation_span(operation: &str) -> Span {
    tracing::debug_span!(
        "operation",
        operation = operation,
        duration_ms = field::Empty,
    )
}

/// Performance timing utilities
pub mod timing {
    use std::time::Instant;
    use tracing::Span;

    /// A timer that logs its duration when dropped
    pub struct Timer {
        start: Instant,
        span: Span,
        operation: String,
    }

    impl Timer {
        pub fn new(operation: &str) -> Self {
            Self {
                start: Instant::now(),
                span: super::create_operation_span(operation),
                operation: operation.to_string(),
            }
        }

        /// Get elapsed time without finishing the timer
        pub fn elapsed(&self) -> std::time::Duration {
            self.start.elapsed()
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            let duration = self.start.elapsed();
            self.span.record("duration_ms", duration.as_millis() as u64);

            tracing::debug!(
                operation = %self.operation,
                duration_ms = duration.as_millis() as u64,
                "Operation completed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_from_verbosity() {
        let config = LoggingConfig::from_verbosity(0);
        assert_eq!(config.level, "warn");
        assert!(!config.source_location);

        let config = LoggingConfig::from_verbosity(1);
        assert_eq!(config.level, "info");

        let config = LoggingConfig::from_verbosity(2);
        assert_eq!(config.level, "debug");
        assert!(config.source_location);

        let config = LoggingConfig::from_verbosity(3);
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, LogFormat::Full);
        assert!(config.thread_ids);
    }

    #[test]
    fn test_file_settings_yield_to_flags() {
        let file = config::LoggingConfig {
            level: Some("debug".to_string()),
            format: Some("JSON".to_string()),
        };

        let mut quiet = LoggingConfig::from_verbosity(0);
        quiet.merge_with_file(&file, 0);
        assert_eq!(quiet.level, "debug");
        assert_eq!(quiet.format, LogFormat::Json);

        let mut verbose = LoggingConfig::from_verbosity(3);
        verbose.merge_with_file(&file, 3);
        assert_eq!(verbose.level, "trace");
    }

    #[test]
    fn test_quiet_keeps_errors_without_color() {
        let mut config = LoggingConfig::from_verbosity(2);
        assert!(config.ansi);

        config.quiet();
        assert_eq!(config.level, "error");
        assert!(!config.ansi);
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("Full".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_timer_measures_elapsed() {
        let timer = timing::Timer::new("test");
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(timer.elapsed().as_millis() >= 2);
    }
}
