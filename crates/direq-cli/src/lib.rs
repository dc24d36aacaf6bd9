// Rust guideline compliant 2026-10-19

//! direq CLI library.
//!
//! This library exposes the CLI modules for use in tests and external code.

pub mod commands;
pub mod context;
pub mod logging;
pub mod output;
pub mod terminal;

pub use context::CliContext;
pub use output::{create_formatter, OutputFormatter};
pub use terminal::{is_stdout_terminal, should_use_color};
