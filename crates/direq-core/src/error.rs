// Rust guideline compliant 2026-10-19

//! Error types for the direq core library.

use crate::compare::Mismatch;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for direq operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for direq operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Compared path does not exist.
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A glob pattern could not be compiled.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why the pattern was rejected.
        reason: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Compared paths differ.
    #[error("{0}")]
    Mismatch(Mismatch),

    /// Directory walk failed.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}
