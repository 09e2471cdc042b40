//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from apidef-core library
    #[error(transparent)]
    Core(#[from] apidef_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(_) => 2,
            Self::FileNotFound { .. } => 3,
            Self::Config { .. } => 4,
            Self::Json(_) => 5,
            Self::Yaml(_) => 6,
            Self::Other { .. } => 99,
        }
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            Error::Io(io::Error::new(io::ErrorKind::Other, "boom")),
            Error::FileNotFound {
                path: PathBuf::from("a.json"),
            },
            Error::config("apidef.yaml", "bad"),
            Error::other("nope"),
        ];
        let codes: Vec<_> = errors.iter().map(Error::exit_code).collect();
        assert_eq!(codes, vec![1, 3, 4, 99]);
    }

    #[test]
    fn test_format_error_includes_import_cause() {
        let inner = apidef_core::Error::unresolved_parent("mq/queues", "auth/projects");
        let error = Error::Core(apidef_core::Error::import(
            "mq/queues",
            PathBuf::from("defs/auth"),
            inner,
        ));

        let text = format_error(&error, false);
        assert!(text.starts_with("Error: Resource 'mq/queues' failed to import 'defs/auth'"));
        assert!(text.ends_with("references unknown parent 'auth/projects'"));
    }
}
