// Rust guideline compliant 2026-10-19

//! Error types for snapshot storage and assertions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Error types for snapshot operations.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Comparison or configuration error from the core library.
    #[error(transparent)]
    Core(#[from] direq_core::Error),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk failed.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Snapshot does not exist.
    #[error("Snapshot not found: {0}")]
    NotFound(String),

    /// No snapshot recorded yet and updates are disabled.
    #[error("Snapshot '{name}' does not exist at {}; run with DIREQ_UPDATE=1 to create it", .path.display())]
    Missing {
        /// Snapshot name.
        name: String,
        /// Where the snapshot was expected.
        path: PathBuf,
    },

    /// Received data does not match the snapshot.
    #[error("Snapshot '{name}' does not match:\n{}", .lines.join("\n"))]
    Mismatch {
        /// Snapshot name.
        name: String,
        /// Rendered difference lines.
        lines: Vec<String>,
    },

    /// Snapshot name cannot be used as a file name.
    #[error("Invalid snapshot name '{0}'")]
    InvalidName(String),

    /// Source location of a test could not be resolved.
    #[error("Invalid test location: {0}")]
    InvalidLocation(String),
}
