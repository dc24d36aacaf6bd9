// Rust guideline compliant 2026-10-19

//! Implementation of the `direq diff` command.
//!
//! Compares a received file or directory against an expected one and prints
//! the rendered difference.

use crate::commands::FilterArgs;
use crate::context::CliContext;
use crate::output::OutputFormatter;
use anyhow::Result;
use direq_core::{compare_paths, Options};
use std::path::PathBuf;

/// Arguments of `direq diff`.
#[derive(Debug, Clone, Default)]
pub struct DiffArgs {
    /// Received path.
    pub received: PathBuf,
    /// Expected path.
    pub expected: PathBuf,
    /// Entry filters.
    pub filter: FilterArgs,
    /// Context lines, overriding the configuration.
    pub context: Option<usize>,
}

/// Executes the diff command.
///
/// # Arguments
///
/// * `args` - Paths and filters to compare with
/// * `context` - Global settings
/// * `formatter` - Output formatter
///
/// # Returns
///
/// `true` if the paths differ.
///
/// # Errors
///
/// Returns an error if:
/// - The received path does not exist
/// - A glob pattern is invalid
/// - Files cannot be read
pub fn execute(
    args: &DiffArgs,
    context: &CliContext,
    formatter: &dyn OutputFormatter,
) -> Result<bool> {
    let options = Options {
        filter: args.filter.build(&context.config)?,
        renderer: context.renderer(),
        context: args.context.unwrap_or(context.config.context_lines),
    };
    let diff = compare_paths(&args.received, &args.expected, &options)?;
    let different = diff.is_different()?;
    tracing::debug!(different, "comparison finished");

    if formatter.is_json() {
        println!("{}", formatter.format_diff(&[], &diff.summary()?));
    } else if different {
        let lines = diff.diff_lines(&options.renderer)?;
        println!("{}", formatter.format_diff(&lines, &diff.summary()?));
    }
    Ok(different)
}
