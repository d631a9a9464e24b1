//! Error types for m3u-merge
//!
//! Defines the error enum covering configuration, input and output failures.
//! Recoverable input problems (a resource line with no metadata line, an
//! unreadable input document) are logged and never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for m3u-merge operations
pub type Result<T> = std::result::Result<T, M3uMergeError>;

/// Error type for m3u-merge operations
#[derive(Error, Debug)]
pub enum M3uMergeError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A group rename was requested without a group keyword filter
    #[error("Renaming a group requires group keywords (--group-keywords)")]
    MissingGroupForRename,

    /// None of the input documents contained a single entry
    #[error("No valid entries found in any input document")]
    NoEntries,

    /// Output file exists and is not one of the inputs
    #[error("Output file already exists: {} (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors (run summary)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors (configuration file)
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Keyword patterns that fail to compile
    #[error("Pattern error: {0}")]
    Regex(#[from] regex::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl M3uMergeError {
    /// Whether the error is a configuration contract violation.
    ///
    /// These abort the run before any document is merged.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            M3uMergeError::Config(_) | M3uMergeError::MissingGroupForRename
        )
    }
}
