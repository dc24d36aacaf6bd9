// Rust guideline compliant 2026-10-19

//! Recursive comparison of a received directory against a snapshot directory.

use crate::file_diff::FileDiff;
use crate::filter::PathFilter;
use crate::render::Renderer;
use crate::wdiff::DEFAULT_CONTEXT;
use crate::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Kind of a directory entry, following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Anything else (socket, fifo, device).
    Other,
    /// Metadata could not be read (e.g. dangling symlink).
    Unreadable,
}

impl EntryKind {
    /// Determines the kind of the entry at `path`.
    pub fn of(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => EntryKind::Directory,
            Ok(meta) if meta.is_file() => EntryKind::File,
            Ok(_) => EntryKind::Other,
            Err(_) => EntryKind::Unreadable,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
            EntryKind::Other => "special file",
            EntryKind::Unreadable => "unreadable entry",
        };
        f.write_str(label)
    }
}

/// A common entry whose kind differs between both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatch {
    /// Entry name.
    pub name: OsString,
    /// Kind on the received side.
    pub received: EntryKind,
    /// Kind on the snapshot side.
    pub snapshot: EntryKind,
}

/// Relative paths of every difference in a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    /// Entries only present in the received tree.
    pub added: Vec<String>,
    /// Entries only present in the snapshot tree.
    pub missing: Vec<String>,
    /// Files whose contents differ.
    pub changed: Vec<String>,
    /// Entries whose kind differs.
    pub type_mismatches: Vec<String>,
    /// Files that could not be compared.
    pub unreadable: Vec<String>,
}

impl DiffSummary {
    /// Returns whether no difference was recorded.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.missing.is_empty()
            && self.changed.is_empty()
            && self.type_mismatches.is_empty()
            && self.unreadable.is_empty()
    }
}

/// Difference between two directory trees.
///
/// Names are sorted; `received_only` are entries the snapshot lacks and
/// `snapshot_only` entries the received tree lacks. Names are kept as
/// [`OsString`] and only converted for display.
#[derive(Debug, Clone)]
pub struct DirDiff {
    received: PathBuf,
    snapshot: PathBuf,
    prefix: PathBuf,
    context: usize,
    pub received_only: Vec<OsString>,
    pub snapshot_only: Vec<OsString>,
    pub type_mismatches: Vec<TypeMismatch>,
    pub same_files: Vec<OsString>,
    pub diff_files: Vec<OsString>,
    pub unreadable_files: Vec<OsString>,
    pub subdirs: BTreeMap<OsString, DirDiff>,
}

impl DirDiff {
    /// Compares two directories recursively.
    ///
    /// # Errors
    ///
    /// Returns an error if either directory cannot be listed.
    pub fn compare(received: &Path, snapshot: &Path, filter: &PathFilter) -> Result<Self> {
        Self::compare_at(received, snapshot, PathBuf::new(), filter, DEFAULT_CONTEXT)
    }

    /// Compares two directories with a custom number of diff context lines.
    ///
    /// # Errors
    ///
    /// Returns an error if either directory cannot be listed.
    pub fn compare_with_context(
        received: &Path,
        snapshot: &Path,
        filter: &PathFilter,
        context: usize,
    ) -> Result<Self> {
        Self::compare_at(received, snapshot, PathBuf::new(), filter, context)
    }

    fn compare_at(
        received: &Path,
        snapshot: &Path,
        prefix: PathBuf,
        filter: &PathFilter,
        context: usize,
    ) -> Result<Self> {
        tracing::debug!(
            received = %received.display(),
            snapshot = %snapshot.display(),
            "comparing directories"
        );
        let received_list = list_dir(received, filter)?;
        let snapshot_list = list_dir(snapshot, filter)?;

        let mut diff = DirDiff {
            received: received.to_path_buf(),
            snapshot: snapshot.to_path_buf(),
            prefix,
            context,
            received_only: Vec::new(),
            snapshot_only: Vec::new(),
            type_mismatches: Vec::new(),
            same_files: Vec::new(),
            diff_files: Vec::new(),
            unreadable_files: Vec::new(),
            subdirs: BTreeMap::new(),
        };

        for name in received_list.difference(&snapshot_list) {
            if diff.one_sided_admitted(&received.join(name), name, filter)? {
                diff.received_only.push(name.clone());
            }
        }
        for name in snapshot_list.difference(&received_list) {
            if diff.one_sided_admitted(&snapshot.join(name), name, filter)? {
                diff.snapshot_only.push(name.clone());
            }
        }

        let mut common_files = Vec::new();
        for name in received_list.intersection(&snapshot_list) {
            let rel = diff.prefix.join(name);
            let received_kind = EntryKind::of(&received.join(name));
            let snapshot_kind = EntryKind::of(&snapshot.join(name));

            match (received_kind, snapshot_kind) {
                (EntryKind::Directory, EntryKind::Directory) => {
                    if filter.admits_dir(&rel) {
                        let sub = Self::compare_at(
                            &received.join(name),
                            &snapshot.join(name),
                            rel,
                            filter,
                            context,
                        )?;
                        diff.subdirs.insert(name.clone(), sub);
                    }
                }
                (EntryKind::File, EntryKind::File) => {
                    if filter.admits_file(&rel) {
                        common_files.push(name.clone());
                    }
                }
                (received_kind, snapshot_kind) => {
                    let admitted = if received_kind == EntryKind::File
                        || snapshot_kind == EntryKind::File
                    {
                        filter.admits_file(&rel)
                    } else {
                        filter.admits_dir(&rel)
                    };
                    if admitted {
                        diff.type_mismatches.push(TypeMismatch {
                            name: name.clone(),
                            received: received_kind,
                            snapshot: snapshot_kind,
                        });
                    }
                }
            }
        }

        let outcomes: Vec<(OsString, std::io::Result<bool>)> = common_files
            .into_par_iter()
            .map(|name| {
                let outcome = files_differ(&received.join(&name), &snapshot.join(&name));
                (name, outcome)
            })
            .collect();
        for (name, outcome) in outcomes {
            match outcome {
                Ok(false) => diff.same_files.push(name),
                Ok(true) => diff.diff_files.push(name),
                Err(e) => {
                    tracing::warn!(name = %name.to_string_lossy(), error = %e, "could not compare file");
                    diff.unreadable_files.push(name);
                }
            }
        }

        Ok(diff)
    }

    fn one_sided_admitted(&self, abs: &Path, name: &OsStr, filter: &PathFilter) -> Result<bool> {
        let rel = self.prefix.join(name);
        if abs.is_dir() {
            filter.admits_tree(abs, &rel)
        } else {
            Ok(filter.admits_file(&rel))
        }
    }

    /// Root of the received side.
    pub fn received(&self) -> &Path {
        &self.received
    }

    /// Root of the snapshot side.
    pub fn snapshot(&self) -> &Path {
        &self.snapshot
    }

    /// Returns whether the trees differ anywhere.
    pub fn is_different(&self) -> bool {
        !self.received_only.is_empty()
            || !self.snapshot_only.is_empty()
            || !self.type_mismatches.is_empty()
            || !self.diff_files.is_empty()
            || !self.unreadable_files.is_empty()
            || self.subdirs.values().any(DirDiff::is_different)
    }

    fn rel(&self, name: &OsStr) -> String {
        display_path(&self.prefix.join(name))
    }

    /// Renders every difference as display lines.
    ///
    /// Per directory: changed files, added entries, missing entries, type
    /// mismatches, unreadable files, then subdirectories in name order.
    ///
    /// # Errors
    ///
    /// Returns an error if a changed file cannot be read.
    pub fn diff_lines(&self, renderer: &Renderer) -> Result<Vec<String>> {
        let mut lines = Vec::new();

        for name in &self.diff_files {
            let diff = FileDiff::new(self.received.join(name), self.snapshot.join(name))
                .with_context(self.context)
                .with_name(self.rel(name));
            lines.extend(diff.diff_lines(renderer)?);
        }

        for name in &self.received_only {
            let rel = renderer.received_diff_style(&self.rel(name));
            lines.push(renderer.reset(
                &renderer.received_style(&format!("+++ added: <received>/{}", rel)),
            ));
            lines.push(renderer.reset(&renderer.snapshot_style("--- N/A")));
        }

        for name in &self.snapshot_only {
            let rel = renderer.snapshot_diff_style(&self.rel(name));
            lines.push(renderer.reset(&renderer.received_style("+++ N/A")));
            lines.push(renderer.reset(
                &renderer.snapshot_style(&format!("--- missing: <snapshot>/{}", rel)),
            ));
        }

        for mismatch in &self.type_mismatches {
            lines.push(renderer.reset(&format!(
                "🚫 {}: type differs (received {} <> snapshot {})",
                self.rel(&mismatch.name),
                mismatch.received,
                mismatch.snapshot
            )));
        }

        for name in &self.unreadable_files {
            lines.push(renderer.reset(&format!("🚫 {}: could not be compared", self.rel(name))));
        }

        for sub in self.subdirs.values() {
            lines.extend(sub.diff_lines(renderer)?);
        }

        Ok(lines)
    }

    /// Collects the relative paths of every difference.
    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary::default();
        self.collect(&mut summary);
        summary
    }

    fn collect(&self, summary: &mut DiffSummary) {
        summary
            .added
            .extend(self.received_only.iter().map(|name| self.rel(name)));
        summary
            .missing
            .extend(self.snapshot_only.iter().map(|name| self.rel(name)));
        summary
            .changed
            .extend(self.diff_files.iter().map(|name| self.rel(name)));
        summary
            .type_mismatches
            .extend(self.type_mismatches.iter().map(|m| self.rel(&m.name)));
        summary
            .unreadable
            .extend(self.unreadable_files.iter().map(|name| self.rel(name)));
        for sub in self.subdirs.values() {
            sub.collect(summary);
        }
    }
}

/// Lists the admitted entry names of a directory, sorted.
fn list_dir(dir: &Path, filter: &PathFilter) -> Result<BTreeSet<OsString>> {
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name();
        if !filter.is_ignored_name(&name) {
            names.insert(name);
        }
    }
    Ok(names)
}

/// Byte comparison with an early exit on size mismatch.
fn files_differ(left: &Path, right: &Path) -> std::io::Result<bool> {
    const CHUNK: usize = 8 * 1024;

    if fs::metadata(left)?.len() != fs::metadata(right)?.len() {
        return Ok(true);
    }

    let mut left = fs::File::open(left)?;
    let mut right = fs::File::open(right)?;
    let mut left_buf = [0u8; CHUNK];
    let mut right_buf = [0u8; CHUNK];
    loop {
        let read = read_full(&mut left, &mut left_buf)?;
        let other = read_full(&mut right, &mut right_buf)?;
        if read != other || left_buf[..read] != right_buf[..other] {
            return Ok(true);
        }
        if read == 0 {
            return Ok(false);
        }
    }
}

fn read_full(file: &mut fs::File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// Formats a relative path with `/` separators.
pub(crate) fn display_path(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_identical_trees() {
        let temp_dir = TempDir::new().unwrap();
        let (received, snapshot) = (temp_dir.path().join("r"), temp_dir.path().join("s"));
        for root in [&received, &snapshot] {
            write(root, "file", "content\n");
            write(root, "sub/nested/file", "nested\n");
        }

        let diff = DirDiff::compare(&received, &snapshot, &PathFilter::default()).unwrap();
        assert!(!diff.is_different());
        assert_eq!(diff.same_files, vec!["file"]);
        assert!(diff.diff_lines(&Renderer::plain()).unwrap().is_empty());
    }

    #[test]
    fn test_added_and_missing_entries() {
        let temp_dir = TempDir::new().unwrap();
        let (received, snapshot) = (temp_dir.path().join("r"), temp_dir.path().join("s"));
        write(&received, "file", "content\n");
        write(&received, "extra", "extra\n");
        write(&snapshot, "file", "content\n");
        write(&snapshot, "gone", "gone\n");

        let diff = DirDiff::compare(&received, &snapshot, &PathFilter::default()).unwrap();
        assert!(diff.is_different());
        assert_eq!(
            diff.diff_lines(&Renderer::plain()).unwrap(),
            vec![
                "+++ added: <received>/extra",
                "--- N/A",
                "+++ N/A",
                "--- missing: <snapshot>/gone",
            ]
        );
    }

    #[test]
    fn test_sibling_subdirectories_keep_their_own_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let (received, snapshot) = (temp_dir.path().join("r"), temp_dir.path().join("s"));
        fs::create_dir_all(snapshot.join("a")).unwrap();
        fs::create_dir_all(snapshot.join("b")).unwrap();
        write(&received, "a/one", "1\n");
        write(&received, "b/two", "2\n");

        let diff = DirDiff::compare(&received, &snapshot, &PathFilter::default()).unwrap();
        let summary = diff.summary();
        assert_eq!(summary.added, vec!["a/one", "b/two"]);
    }

    #[test]
    fn test_type_mismatch() {
        let temp_dir = TempDir::new().unwrap();
        let (received, snapshot) = (temp_dir.path().join("r"), temp_dir.path().join("s"));
        write(&received, "entry", "a file\n");
        write(&snapshot, "entry/inner", "a dir\n");

        let diff = DirDiff::compare(&received, &snapshot, &PathFilter::default()).unwrap();
        assert!(diff.is_different());
        assert_eq!(
            diff.diff_lines(&Renderer::plain()).unwrap(),
            vec!["🚫 entry: type differs (received file <> snapshot directory)"]
        );
    }

    #[test]
    fn test_changed_nested_file_uses_relative_name() {
        let temp_dir = TempDir::new().unwrap();
        let (received, snapshot) = (temp_dir.path().join("r"), temp_dir.path().join("s"));
        write(&received, "sub/file", "new\n");
        write(&snapshot, "sub/file", "old\n");

        let diff = DirDiff::compare(&received, &snapshot, &PathFilter::default()).unwrap();
        let lines = diff.diff_lines(&Renderer::plain()).unwrap();
        assert_eq!(lines[0], "--- <snapshot>/sub/file");
        assert_eq!(lines[1], "+++ <received>/sub/file");
        assert_eq!(diff.summary().changed, vec!["sub/file"]);
    }

    #[test]
    fn test_gitkeeper_is_never_compared() {
        let temp_dir = TempDir::new().unwrap();
        let (received, snapshot) = (temp_dir.path().join("r"), temp_dir.path().join("s"));
        fs::create_dir_all(received.join("empty")).unwrap();
        write(&snapshot, &format!("empty/{}", crate::GITKEEPER), "");

        let diff = DirDiff::compare(&received, &snapshot, &PathFilter::default()).unwrap();
        assert!(!diff.is_different());
    }

    #[test]
    fn test_excluded_files_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let (received, snapshot) = (temp_dir.path().join("r"), temp_dir.path().join("s"));
        write(&received, "root.file", "changed\n");
        write(&snapshot, "root.file", "original\n");
        write(&received, "sub/new.file", "new\n");
        fs::create_dir_all(snapshot.join("sub")).unwrap();

        let filter = PathFilter::builder().exclude("**/*.file").build().unwrap();
        let diff = DirDiff::compare(&received, &snapshot, &filter).unwrap();
        assert!(!diff.is_different());
    }

    #[test]
    fn test_files_differ_same_size() {
        let temp_dir = TempDir::new().unwrap();
        let (left, right) = (temp_dir.path().join("l"), temp_dir.path().join("r"));
        fs::write(&left, "abc").unwrap();
        fs::write(&right, "abd").unwrap();
        assert!(files_differ(&left, &right).unwrap());
        fs::write(&right, "abc").unwrap();
        assert!(!files_differ(&left, &right).unwrap());
    }
}
