// Rust guideline compliant 2026-10-19

//! direq Core Library
//!
//! This crate compares a received file or directory tree against an expected
//! one and renders the differences for humans:
//! - Sequence matching (longest matching blocks, grouped opcodes)
//! - Unified word diff with `[-removed-]` and `{+added+}` spans
//! - Terminal rendering with colors and visible whitespace
//! - Path filtering (name ignores, include/exclude globs)
//! - Recursive directory comparison and the `assert_dir_equal` helper
//! - Configuration loading and error types

pub mod compare;
pub mod config;
pub mod dir_diff;
pub mod error;
pub mod file_diff;
pub mod filter;
pub mod matcher;
pub mod render;
pub mod wdiff;

pub use compare::{assert_dir_equal, assert_dir_equal_with, compare_paths, Mismatch, Options, PathDiff};
pub use config::{ColorMode, Config, CONFIG_FILE};
pub use dir_diff::{DiffSummary, DirDiff, EntryKind, TypeMismatch};
pub use error::{Error, Result};
pub use file_diff::FileDiff;
pub use filter::{PathFilter, PathFilterBuilder, DEFAULT_IGNORES, GITKEEPER};
pub use matcher::{Opcode, SequenceMatcher, Tag};
pub use render::Renderer;
pub use wdiff::{unified_wdiff, DiffLine, Span};

/// Panics with the rendered diff when two paths differ.
///
/// Accepts an optional third argument of type [`Options`].
///
/// ```no_run
/// direq_core::assert_dir_equal!("target/output", "tests/expected");
/// ```
#[macro_export]
macro_rules! assert_dir_equal {
    ($received:expr, $expected:expr $(,)?) => {
        $crate::assert_dir_equal!($received, $expected, &$crate::Options::default())
    };
    ($received:expr, $expected:expr, $options:expr $(,)?) => {
        match $crate::assert_dir_equal_with($received, $expected, $options) {
            Ok(()) => {}
            Err(e) => panic!("{}", e),
        }
    };
}
