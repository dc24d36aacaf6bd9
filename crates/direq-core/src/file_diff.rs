// Rust guideline compliant 2026-10-19

//! Comparison of a single received file against its snapshot.

use crate::render::Renderer;
use crate::wdiff::{split_lines, unified_wdiff, DEFAULT_CONTEXT};
use crate::Result;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Difference between a received file and a snapshot file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    received: PathBuf,
    snapshot: PathBuf,
    context: usize,
    name: Option<String>,
}

impl FileDiff {
    /// Creates a file diff for the two paths.
    pub fn new(received: impl Into<PathBuf>, snapshot: impl Into<PathBuf>) -> Self {
        Self {
            received: received.into(),
            snapshot: snapshot.into(),
            context: DEFAULT_CONTEXT,
            name: None,
        }
    }

    /// Sets the number of context lines around hunks.
    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    /// Overrides the display name used in headers and notices.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Path of the received file.
    pub fn received(&self) -> &Path {
        &self.received
    }

    /// Path of the snapshot file.
    pub fn snapshot(&self) -> &Path {
        &self.snapshot
    }

    /// Display name shared by both sides.
    ///
    /// The longest common suffix of both paths, or `received<>snapshot` file
    /// names when the paths share no trailing component. A name set with
    /// [`FileDiff::with_name`] takes precedence.
    pub fn name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        let suffix = common_suffix(&self.received, &self.snapshot);
        if !suffix.is_empty() {
            return suffix;
        }
        format!(
            "{}<>{}",
            file_name(&self.received),
            file_name(&self.snapshot)
        )
    }

    /// Returns whether the file contents differ.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read.
    pub fn differs(&self) -> Result<bool> {
        Ok(fs::read(&self.received)? != fs::read(&self.snapshot)?)
    }

    /// Renders the difference as display lines.
    ///
    /// Text files get a unified word diff from the snapshot to the received
    /// file. Files that are not valid UTF-8 get a one-line binary notice.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read.
    pub fn diff_lines(&self, renderer: &Renderer) -> Result<Vec<String>> {
        let received = fs::read(&self.received)?;
        let snapshot = fs::read(&self.snapshot)?;
        let name = self.name();

        let (received_text, snapshot_text) =
            match (std::str::from_utf8(&received), std::str::from_utf8(&snapshot)) {
                (Ok(received), Ok(snapshot)) => (received, snapshot),
                _ => {
                    tracing::debug!(name = %name, "comparing as binary");
                    let notice = if received.len() != snapshot.len() {
                        format!("🚫 {}: binary files sizes differs", name)
                    } else {
                        format!("🚫 {}: binary files content differs", name)
                    };
                    return Ok(vec![renderer.reset(&notice)]);
                }
            };

        let lines = unified_wdiff(
            &split_lines(snapshot_text),
            &split_lines(received_text),
            &format!("<snapshot>/{}", name),
            &format!("<received>/{}", name),
            self.context,
        );
        Ok(lines
            .iter()
            .map(|line| renderer.reset(&renderer.render_line(line)))
            .collect())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Joins the trailing components shared by both paths with `/`.
pub(crate) fn common_suffix(left: &Path, right: &Path) -> String {
    let normal = |path: &Path| -> Vec<String> {
        path.components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect()
    };
    let left_parts = normal(left);
    let right_parts = normal(right);

    let mut common: Vec<&str> = left_parts
        .iter()
        .rev()
        .zip(right_parts.iter().rev())
        .take_while(|(l, r)| l == r)
        .map(|(l, _)| l.as_str())
        .collect();
    common.reverse();
    common.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_name_uses_common_suffix() {
        let diff = FileDiff::new("/tmp/a/sub/file.json", "/snaps/b/sub/file.json");
        assert_eq!(diff.name(), "sub/file.json");
    }

    #[test]
    fn test_name_without_common_suffix() {
        let diff = FileDiff::new("/tmp/received.txt", "/snaps/expected.txt");
        assert_eq!(diff.name(), "received.txt<>expected.txt");
    }

    #[test]
    fn test_text_diff_lines() {
        let temp_dir = TempDir::new().unwrap();
        let received = temp_dir.path().join("received/file.json");
        let snapshot = temp_dir.path().join("snapshot/file.json");
        fs::create_dir_all(received.parent().unwrap()).unwrap();
        fs::create_dir_all(snapshot.parent().unwrap()).unwrap();
        fs::write(&received, "{\n}").unwrap();
        fs::write(&snapshot, "{}\n").unwrap();

        let diff = FileDiff::new(&received, &snapshot);
        assert!(diff.differs().unwrap());
        let lines = diff.diff_lines(&Renderer::new(false, false)).unwrap();
        assert_eq!(
            lines,
            vec![
                "--- <snapshot>/file.json",
                "+++ <received>/file.json",
                "@@ -1 +1,2 @@",
                "- {[-}-]",
                "+ {",
                "+ }",
            ]
        );
    }

    #[test]
    fn test_binary_size_differs() {
        let temp_dir = TempDir::new().unwrap();
        let received = temp_dir.path().join("r.bin");
        let snapshot = temp_dir.path().join("s.bin");
        fs::write(&received, [0x00, 0x00]).unwrap();
        fs::write(&snapshot, [0xff]).unwrap();

        let lines = FileDiff::new(&received, &snapshot)
            .diff_lines(&Renderer::plain())
            .unwrap();
        assert_eq!(lines, vec!["🚫 r.bin<>s.bin: binary files sizes differs"]);
    }

    #[test]
    fn test_binary_content_differs() {
        let temp_dir = TempDir::new().unwrap();
        let received = temp_dir.path().join("received/file.bin");
        let snapshot = temp_dir.path().join("snapshot/file.bin");
        fs::create_dir_all(received.parent().unwrap()).unwrap();
        fs::create_dir_all(snapshot.parent().unwrap()).unwrap();
        fs::write(&received, [0x90]).unwrap();
        fs::write(&snapshot, [0x00]).unwrap();

        let lines = FileDiff::new(&received, &snapshot)
            .diff_lines(&Renderer::plain())
            .unwrap();
        assert_eq!(lines, vec!["🚫 file.bin: binary files content differs"]);
    }

    #[test]
    fn test_identical_files() {
        let temp_dir = TempDir::new().unwrap();
        let received = temp_dir.path().join("a");
        let snapshot = temp_dir.path().join("b");
        fs::write(&received, "content\n").unwrap();
        fs::write(&snapshot, "content\n").unwrap();

        let diff = FileDiff::new(&received, &snapshot);
        assert!(!diff.differs().unwrap());
        assert!(diff.diff_lines(&Renderer::plain()).unwrap().is_empty());
    }
}
