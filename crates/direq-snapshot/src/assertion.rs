// Rust guideline compliant 2026-10-19

//! Snapshot assertions.
//!
//! A [`SnapshotAssertion`] compares received paths against the snapshots of
//! one test, or records them when update mode is on.

use crate::location::{SnapshotNamer, TestLocation};
use crate::store::{Snapshot, SnapshotStore};
use crate::{Result, SnapshotError};
use direq_core::{compare_paths, Config, Options, PathFilter};
use std::collections::HashSet;
use std::path::Path;

/// Result of a successful assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Received data matched the snapshot.
    Matched(String),
    /// Snapshot was (re)written from the received data.
    Written(String),
}

impl Outcome {
    /// Name of the snapshot involved.
    pub fn name(&self) -> &str {
        match self {
            Outcome::Matched(name) | Outcome::Written(name) => name,
        }
    }
}

/// Snapshot assertions of one test.
#[derive(Debug, Clone)]
pub struct SnapshotAssertion {
    store: SnapshotStore,
    namer: SnapshotNamer,
    test_name: String,
    options: Options,
    update: bool,
    used: HashSet<String>,
}

impl SnapshotAssertion {
    /// Creates assertions for a test.
    ///
    /// Diffs are rendered with colors only when the configuration forces
    /// them, since test output is usually captured.
    ///
    /// # Errors
    ///
    /// Returns an error if an ignore pattern of the configuration is invalid.
    pub fn new(location: &TestLocation, config: &Config) -> Result<Self> {
        Ok(Self {
            store: SnapshotStore::for_location(location, &config.snapshot_dir),
            namer: SnapshotNamer::new(&location.test_name),
            test_name: location.test_name.clone(),
            options: Options::from_config(config, false)?,
            update: config.update,
            used: HashSet::new(),
        })
    }

    /// Creates assertions for a test from `CARGO_MANIFEST_DIR` and `file!()`.
    ///
    /// Configuration is loaded from `direq.toml` in the manifest directory
    /// and `DIREQ_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the source file cannot be located or the
    /// configuration is invalid.
    pub fn for_test(manifest_dir: &Path, source_file: &str, test_name: &str) -> Result<Self> {
        let location = TestLocation::from_source(manifest_dir, source_file, test_name)?;
        let config = Config::load(manifest_dir)?;
        Self::new(&location, &config)
    }

    /// Names snapshots after a test parameter, as `test_name[param]`.
    pub fn with_param(mut self, param: &str) -> Self {
        self.namer = SnapshotNamer::with_param(&self.test_name, param);
        self
    }

    /// Replaces the comparison filter.
    pub fn with_filter(mut self, filter: PathFilter) -> Self {
        self.options.filter = filter;
        self
    }

    /// Replaces all comparison options.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Turns update mode on or off.
    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    /// Store holding this test's snapshots.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Asserts that `received` matches the next snapshot of the test.
    ///
    /// In update mode the snapshot is written instead, and kept identical
    /// snapshots are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Missing`] if no snapshot exists outside update
    /// mode, [`SnapshotError::Mismatch`] with the rendered diff if the data
    /// differs, or another error if the paths cannot be compared.
    pub fn assert_match(&mut self, received: impl AsRef<Path>) -> Result<Outcome> {
        let received = received.as_ref();
        let name = self.namer.next_name();
        self.used.insert(name.clone());

        let existing = self.store.read(&name)?;
        let diff = match &existing {
            Some(snapshot) => Some(compare_paths(received, snapshot, &self.options)?),
            None => None,
        };
        let different = match &diff {
            Some(diff) => diff.is_different()?,
            None => true,
        };

        if !different {
            tracing::debug!(name = %name, "snapshot matched");
            return Ok(Outcome::Matched(name));
        }

        if self.update {
            let store = &self.store;
            let filter = &self.options.filter;
            store.with_lock(|| store.write(&name, received, filter))?;
            return Ok(Outcome::Written(name));
        }

        match diff {
            None => Err(SnapshotError::Missing {
                path: self.store.path_of(&name),
                name,
            }),
            Some(diff) => Err(SnapshotError::Mismatch {
                lines: diff.diff_lines(&self.options.renderer)?,
                name,
            }),
        }
    }

    /// Names asserted so far.
    pub fn used_names(&self) -> &HashSet<String> {
        &self.used
    }

    /// Snapshots of this test that no assertion used so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be listed.
    pub fn unused(&self) -> Result<Vec<Snapshot>> {
        Ok(self
            .store
            .discover_for(&self.test_name)?
            .into_iter()
            .filter(|snapshot| !self.used.contains(&snapshot.name))
            .collect())
    }
}
