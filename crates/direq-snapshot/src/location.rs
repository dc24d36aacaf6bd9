// Rust guideline compliant 2026-10-19

//! Test locations and snapshot naming.

use crate::{Result, SnapshotError};
use std::path::{Path, PathBuf};

/// Where a test lives, used to place its snapshots.
///
/// Snapshots of the test `test_name` in `module_dir/<basename>.rs` live in
/// `module_dir/<snapshot_dir>/<basename>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestLocation {
    /// Directory of the test source file.
    pub module_dir: PathBuf,
    /// Test source file name without extension.
    pub basename: String,
    /// Test function name.
    pub test_name: String,
}

impl TestLocation {
    /// Creates a location from its parts.
    pub fn new(
        module_dir: impl Into<PathBuf>,
        basename: impl Into<String>,
        test_name: impl Into<String>,
    ) -> Self {
        Self {
            module_dir: module_dir.into(),
            basename: basename.into(),
            test_name: test_name.into(),
        }
    }

    /// Resolves a location from `CARGO_MANIFEST_DIR` and `file!()`.
    ///
    /// `file!()` is relative to the crate when built alone and relative to
    /// the workspace root in a workspace build, so the manifest directory and
    /// each of its ancestors are tried in turn.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidLocation`] if no existing file matches
    /// or the file has no name.
    pub fn from_source(manifest_dir: &Path, source_file: &str, test_name: &str) -> Result<Self> {
        let source = Path::new(source_file);
        let resolved = if source.is_absolute() {
            Some(source.to_path_buf())
        } else {
            manifest_dir
                .ancestors()
                .map(|root| root.join(source))
                .find(|candidate| candidate.is_file())
        };
        let resolved =
            resolved.ok_or_else(|| SnapshotError::InvalidLocation(source_file.to_string()))?;

        let basename = resolved
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| SnapshotError::InvalidLocation(source_file.to_string()))?;
        let module_dir = resolved
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self::new(module_dir, basename, test_name))
    }

    /// Directory holding this module's snapshots.
    pub fn snapshot_dir(&self, dirname: &str) -> PathBuf {
        self.module_dir.join(dirname).join(&self.basename)
    }
}

/// Hands out snapshot names for successive assertions of one test.
///
/// The first name is the test name, later ones get `.1`, `.2`, and so on.
/// A parametrized test appends its parameter in brackets before the index.
#[derive(Debug, Clone)]
pub struct SnapshotNamer {
    base: String,
    index: usize,
}

impl SnapshotNamer {
    /// Starts naming for `test_name`.
    pub fn new(test_name: &str) -> Self {
        Self {
            base: test_name.to_string(),
            index: 0,
        }
    }

    /// Starts naming for one parameter of a parametrized test.
    pub fn with_param(test_name: &str, param: &str) -> Self {
        Self {
            base: format!("{}[{}]", test_name, param),
            index: 0,
        }
    }

    /// Name shared by all assertions of the test.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the name of the next assertion.
    pub fn next_name(&mut self) -> String {
        let name = if self.index == 0 {
            self.base.clone()
        } else {
            format!("{}.{}", self.base, self.index)
        };
        self.index += 1;
        name
    }
}

/// Returns whether `name` belongs to the test `test_name`.
pub fn belongs_to(name: &str, test_name: &str) -> bool {
    match name.strip_prefix(test_name) {
        Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}

/// Checks that a snapshot name is a plain file name.
///
/// # Errors
///
/// Returns [`SnapshotError::InvalidName`] for empty names, hidden names and
/// names containing path separators.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name.starts_with('.')
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(SnapshotError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_namer_sequence() {
        let mut namer = SnapshotNamer::new("test_flat_directory");
        assert_eq!(namer.next_name(), "test_flat_directory");
        assert_eq!(namer.next_name(), "test_flat_directory.1");
        assert_eq!(namer.next_name(), "test_flat_directory.2");
    }

    #[test]
    fn test_namer_with_param() {
        let mut namer = SnapshotNamer::with_param("test_parametrize", "1st");
        assert_eq!(namer.base(), "test_parametrize[1st]");
        assert_eq!(namer.next_name(), "test_parametrize[1st]");
        assert_eq!(namer.next_name(), "test_parametrize[1st].1");
    }

    #[test]
    fn test_belongs_to() {
        assert!(belongs_to("test_a", "test_a"));
        assert!(belongs_to("test_a.1", "test_a"));
        assert!(belongs_to("test_a[x]", "test_a"));
        assert!(!belongs_to("test_ab", "test_a"));
        assert!(!belongs_to("other", "test_a"));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("test_a.1").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(".hidden").is_err());
        assert!(validate_name("a/b").is_err());
    }

    #[test]
    fn test_from_source_walks_ancestors() {
        let temp_dir = TempDir::new().unwrap();
        let crate_dir = temp_dir.path().join("crates/demo");
        fs::create_dir_all(crate_dir.join("tests")).unwrap();
        fs::write(crate_dir.join("tests/snap.rs"), "").unwrap();

        let location =
            TestLocation::from_source(&crate_dir, "crates/demo/tests/snap.rs", "test_x").unwrap();
        assert_eq!(location.module_dir, crate_dir.join("tests"));
        assert_eq!(location.basename, "snap");
        assert_eq!(
            location.snapshot_dir("__snapshots__"),
            crate_dir.join("tests/__snapshots__/snap")
        );

        let location = TestLocation::from_source(&crate_dir, "tests/snap.rs", "test_x").unwrap();
        assert_eq!(location.module_dir, crate_dir.join("tests"));
    }

    #[test]
    fn test_from_source_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = TestLocation::from_source(temp_dir.path(), "tests/nope.rs", "t");
        assert!(matches!(result, Err(SnapshotError::InvalidLocation(_))));
    }
}
