// Rust guideline compliant 2026-10-19

//! Path filtering for tree comparison.
//!
//! Two levels of filtering apply:
//! - name-level ignores, matched against an entry's file name at any depth
//! - relative-path `include`/`exclude` globs, matched against the path of an
//!   entry relative to the compared root

use crate::{Error, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::ffi::OsStr;
use std::path::Path;
use walkdir::WalkDir;

/// Entry names ignored unless [`PathFilterBuilder::without_default_ignores`]
/// is used.
pub const DEFAULT_IGNORES: &[&str] = &[
    "RCS",
    "CVS",
    "tags",
    ".git",
    ".hg",
    ".bzr",
    "_darcs",
    "__pycache__",
];

/// Marker file keeping empty directories inside snapshots. Never compared.
pub const GITKEEPER: &str = "direq.gitkeep";

/// Decides which entries take part in a comparison.
#[derive(Debug, Clone)]
pub struct PathFilter {
    default_ignores: bool,
    ignore: GlobSet,
    include: Option<GlobSet>,
    exclude: GlobSet,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self {
            default_ignores: true,
            ignore: GlobSet::empty(),
            include: None,
            exclude: GlobSet::empty(),
        }
    }
}

impl PathFilter {
    /// Starts building a filter.
    pub fn builder() -> PathFilterBuilder {
        PathFilterBuilder::default()
    }

    /// Returns whether an entry with this file name is skipped entirely.
    pub fn is_ignored_name(&self, name: impl AsRef<OsStr>) -> bool {
        let name = name.as_ref();
        name == GITKEEPER
            || (self.default_ignores && DEFAULT_IGNORES.iter().any(|ignored| name == *ignored))
            || self.ignore.is_match(name)
    }

    /// Returns whether include patterns were given.
    pub fn has_include(&self) -> bool {
        self.include.is_some()
    }

    /// Returns whether the file at `rel` (relative to the root) is compared.
    pub fn admits_file(&self, rel: &Path) -> bool {
        !self.exclude.is_match(rel) && self.include.as_ref().map_or(true, |set| set.is_match(rel))
    }

    /// Returns whether the directory at `rel` is traversed.
    pub fn admits_dir(&self, rel: &Path) -> bool {
        !self.exclude.is_match(rel)
    }

    /// Returns whether a directory present on one side only is worth reporting.
    ///
    /// Without include patterns any admitted directory is. With include
    /// patterns, the tree at `abs` must hold at least one admitted file.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be walked.
    pub fn admits_tree(&self, abs: &Path, rel: &Path) -> Result<bool> {
        if !self.admits_dir(rel) {
            return Ok(false);
        }
        if self.include.is_none() {
            return Ok(true);
        }

        let walker = WalkDir::new(abs)
            .follow_links(true)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| {
                if self.is_ignored_name(entry.file_name()) {
                    return false;
                }
                match entry.path().strip_prefix(abs) {
                    Ok(inner) if entry.file_type().is_dir() => self.admits_dir(&rel.join(inner)),
                    _ => true,
                }
            });

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            if let Ok(inner) = entry.path().strip_prefix(abs) {
                if self.admits_file(&rel.join(inner)) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

/// Builder for [`PathFilter`].
#[derive(Debug, Clone)]
pub struct PathFilterBuilder {
    default_ignores: bool,
    ignore: Vec<String>,
    include: Vec<String>,
    exclude: Vec<String>,
}

impl Default for PathFilterBuilder {
    fn default() -> Self {
        Self {
            default_ignores: true,
            ignore: Vec::new(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl PathFilterBuilder {
    /// Ignores entries whose file name matches `pattern`.
    pub fn ignore(mut self, pattern: impl Into<String>) -> Self {
        self.ignore.push(pattern.into());
        self
    }

    /// Only compares files whose relative path matches `pattern`.
    ///
    /// May be given several times; a file matching any pattern is kept.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include.push(pattern.into());
        self
    }

    /// Skips entries whose relative path matches `pattern`.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    /// Also compares version-control and cache directories.
    pub fn without_default_ignores(mut self) -> Self {
        self.default_ignores = false;
        self
    }

    /// Compiles the patterns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if a glob does not compile.
    pub fn build(self) -> Result<PathFilter> {
        let include = if self.include.is_empty() {
            None
        } else {
            Some(compile(&self.include)?)
        };
        Ok(PathFilter {
            default_ignores: self.default_ignores,
            ignore: compile(&self.ignore)?,
            include,
            exclude: compile(&self.exclude)?,
        })
    }
}

fn compile(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| Error::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| Error::InvalidPattern {
        pattern: patterns.join(", "),
        reason: e.to_string(),
    })
}
