// Rust guideline compliant 2026-10-19

//! Path-level comparison and the `assert_dir_equal` helper.

use crate::dir_diff::{display_path, DiffSummary, DirDiff, EntryKind};
use crate::file_diff::FileDiff;
use crate::filter::PathFilter;
use crate::render::Renderer;
use crate::wdiff::DEFAULT_CONTEXT;
use crate::{Config, Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Options shared by comparisons.
#[derive(Debug, Clone)]
pub struct Options {
    /// Which entries take part.
    pub filter: PathFilter,
    /// How differences are rendered.
    pub renderer: Renderer,
    /// Context lines around diff hunks.
    pub context: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            filter: PathFilter::default(),
            renderer: Renderer::plain(),
            context: DEFAULT_CONTEXT,
        }
    }
}

impl Options {
    /// Builds options from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an ignore pattern does not compile.
    pub fn from_config(config: &Config, is_terminal: bool) -> Result<Self> {
        let filter = config
            .ignore
            .iter()
            .fold(PathFilter::builder(), |builder, pattern| builder.ignore(pattern))
            .build()?;
        Ok(Self {
            filter,
            renderer: Renderer::from_config(config, is_terminal),
            context: config.context_lines,
        })
    }
}

/// Difference between a received path and an expected path.
#[derive(Debug, Clone)]
pub enum PathDiff {
    /// Both sides are files.
    File(FileDiff),
    /// Both sides are directories.
    Dir(DirDiff),
    /// The kinds differ, or a side is neither a file nor a directory.
    KindMismatch {
        /// Display name.
        name: String,
        /// Kind of the received path.
        received: EntryKind,
        /// Kind of the expected path.
        snapshot: EntryKind,
    },
    /// The expected path does not exist.
    Missing {
        /// Display name.
        name: String,
    },
}

impl PathDiff {
    /// Returns whether the two sides differ.
    ///
    /// # Errors
    ///
    /// Returns an error if compared files cannot be read.
    pub fn is_different(&self) -> Result<bool> {
        match self {
            PathDiff::File(diff) => diff.differs(),
            PathDiff::Dir(diff) => Ok(diff.is_different()),
            PathDiff::KindMismatch { .. } | PathDiff::Missing { .. } => Ok(true),
        }
    }

    /// Renders the difference as display lines.
    ///
    /// # Errors
    ///
    /// Returns an error if compared files cannot be read.
    pub fn diff_lines(&self, renderer: &Renderer) -> Result<Vec<String>> {
        match self {
            PathDiff::File(diff) => {
                if diff.differs()? {
                    diff.diff_lines(renderer)
                } else {
                    Ok(Vec::new())
                }
            }
            PathDiff::Dir(diff) => diff.diff_lines(renderer),
            PathDiff::KindMismatch {
                name,
                received,
                snapshot,
            } => Ok(vec![renderer.reset(&format!(
                "🚫 {}: type differs (received {} <> snapshot {})",
                name, received, snapshot
            ))]),
            PathDiff::Missing { name } => Ok(vec![
                renderer.reset(&renderer.received_style(&format!(
                    "+++ added: <received>/{}",
                    renderer.received_diff_style(name)
                ))),
                renderer.reset(&renderer.snapshot_style("--- N/A")),
            ]),
        }
    }

    /// Collects the relative paths of every difference.
    ///
    /// # Errors
    ///
    /// Returns an error if compared files cannot be read.
    pub fn summary(&self) -> Result<DiffSummary> {
        let mut summary = DiffSummary::default();
        match self {
            PathDiff::File(diff) => {
                if diff.differs()? {
                    summary.changed.push(diff.name());
                }
            }
            PathDiff::Dir(diff) => summary = diff.summary(),
            PathDiff::KindMismatch { name, .. } => summary.type_mismatches.push(name.clone()),
            PathDiff::Missing { name } => summary.added.push(name.clone()),
        }
        Ok(summary)
    }
}

/// Compares a received path against an expected path.
///
/// Two directories are compared as trees and two regular files by content.
/// Any other pairing, special files included, is a kind mismatch; special
/// files are never read.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the received path does not exist, or an IO
/// error if a directory cannot be listed.
pub fn compare_paths(received: &Path, expected: &Path, options: &Options) -> Result<PathDiff> {
    if !received.exists() {
        return Err(Error::NotFound(received.to_path_buf()));
    }
    let name = root_name(received, expected);
    if !expected.exists() {
        return Ok(PathDiff::Missing { name });
    }

    let received_kind = EntryKind::of(received);
    let snapshot_kind = EntryKind::of(expected);
    let diff = match (received_kind, snapshot_kind) {
        (EntryKind::Directory, EntryKind::Directory) => PathDiff::Dir(
            DirDiff::compare_with_context(received, expected, &options.filter, options.context)?,
        ),
        (EntryKind::File, EntryKind::File) => {
            PathDiff::File(FileDiff::new(received, expected).with_context(options.context))
        }
        _ => PathDiff::KindMismatch {
            name,
            received: received_kind,
            snapshot: snapshot_kind,
        },
    };
    Ok(diff)
}

fn root_name(received: &Path, expected: &Path) -> String {
    let suffix = crate::file_diff::common_suffix(received, expected);
    if !suffix.is_empty() {
        return suffix;
    }
    received
        .file_name()
        .map(|name| display_path(Path::new(name)))
        .unwrap_or_else(|| received.display().to_string())
}

/// A failed equality assertion with its rendered diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Received path.
    pub received: PathBuf,
    /// Expected path.
    pub expected: PathBuf,
    /// Rendered difference lines.
    pub lines: Vec<String>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} does not match {}",
            self.received.display(),
            self.expected.display()
        )?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Asserts that `received` has the same content as `expected`.
///
/// Works on files and directory trees alike. Uses default options: version
/// control directories are skipped and the diff is rendered without colors.
///
/// # Errors
///
/// Returns [`Error::Mismatch`] with the rendered diff when the paths differ,
/// or another error when they cannot be compared.
pub fn assert_dir_equal(received: impl AsRef<Path>, expected: impl AsRef<Path>) -> Result<()> {
    assert_dir_equal_with(received, expected, &Options::default())
}

/// Same as [`assert_dir_equal`] with explicit options.
///
/// # Errors
///
/// See [`assert_dir_equal`].
pub fn assert_dir_equal_with(
    received: impl AsRef<Path>,
    expected: impl AsRef<Path>,
    options: &Options,
) -> Result<()> {
    let (received, expected) = (received.as_ref(), expected.as_ref());
    let diff = compare_paths(received, expected, options)?;
    if !diff.is_different()? {
        return Ok(());
    }
    Err(Error::Mismatch(Mismatch {
        received: received.to_path_buf(),
        expected: expected.to_path_buf(),
        lines: diff.diff_lines(&options.renderer)?,
    }))
}
