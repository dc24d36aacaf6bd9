// Rust guideline compliant 2026-10-19

//! Command implementations for the direq CLI.

pub mod diff;
pub mod snapshot;

use anyhow::Result;
use direq_core::{Config, PathFilter};

/// Filtering flags shared by comparing commands.
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    /// Relative-path globs of files to compare.
    pub include: Vec<String>,
    /// Relative-path globs of entries to skip.
    pub exclude: Vec<String>,
    /// File name globs to ignore, added to the configured ones.
    pub ignore: Vec<String>,
    /// Also compare version-control and cache directories.
    pub no_default_ignores: bool,
}

impl FilterArgs {
    /// Builds the path filter from the flags and configured ignores.
    ///
    /// # Errors
    ///
    /// Returns an error if a glob pattern is invalid.
    pub fn build(&self, config: &Config) -> Result<PathFilter> {
        let mut builder = PathFilter::builder();
        for pattern in config.ignore.iter().chain(&self.ignore) {
            builder = builder.ignore(pattern);
        }
        for pattern in &self.include {
            builder = builder.include(pattern);
        }
        for pattern in &self.exclude {
            builder = builder.exclude(pattern);
        }
        if self.no_default_ignores {
            builder = builder.without_default_ignores();
        }
        Ok(builder.build()?)
    }
}
