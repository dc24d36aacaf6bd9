// Rust guideline compliant 2026-10-19

//! On-disk snapshot storage.
//!
//! A store is one directory holding the snapshots of one test module. Each
//! snapshot is either a file or a directory tree named after its assertion.
//! Empty directories inside a tree snapshot hold a [`GITKEEPER`] file so
//! version control keeps them.

use crate::location::{belongs_to, validate_name, TestLocation};
use crate::{Result, SnapshotError};
use direq_core::{PathFilter, GITKEEPER};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the lock file serializing writes to a store.
pub const LOCK_FILE: &str = ".direq.lock";

/// Kind of a stored snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotKind {
    /// Single file.
    File,
    /// Directory tree.
    Directory,
}

/// A snapshot found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Snapshot name.
    pub name: String,
    /// Path of the snapshot file or directory.
    pub path: PathBuf,
    /// File or directory.
    pub kind: SnapshotKind,
}

/// Snapshot directory of one test module.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Creates a store rooted at `dir`. Nothing is created on disk yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates the store for a test location.
    ///
    /// # Arguments
    ///
    /// * `location` - The test location
    /// * `dirname` - Name of the snapshot directory next to the test module
    pub fn for_location(location: &TestLocation, dirname: &str) -> Self {
        Self::new(location.snapshot_dir(dirname))
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a snapshot named `name` occupies.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Lists every snapshot, sorted by name.
    ///
    /// Hidden entries (the lock file among them) and entries whose name is not
    /// valid UTF-8 are skipped. A missing store directory holds no snapshots.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be listed.
    pub fn discover(&self) -> Result<Vec<Snapshot>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut snapshots = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(name) => {
                    tracing::warn!(name = %name.to_string_lossy(), "skipping non UTF-8 entry");
                    continue;
                }
            };
            if name.starts_with('.') {
                continue;
            }
            let kind = if entry.file_type()?.is_dir() {
                SnapshotKind::Directory
            } else {
                SnapshotKind::File
            };
            snapshots.push(Snapshot {
                name,
                path: entry.path(),
                kind,
            });
        }
        snapshots.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(snapshots)
    }

    /// Lists the snapshots recorded by one test.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be listed.
    pub fn discover_for(&self, test_name: &str) -> Result<Vec<Snapshot>> {
        Ok(self
            .discover()?
            .into_iter()
            .filter(|snapshot| belongs_to(&snapshot.name, test_name))
            .collect())
    }

    /// Returns the path of a snapshot, or `None` when it was never recorded.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidName`] for names that are not plain
    /// file names.
    pub fn read(&self, name: &str) -> Result<Option<PathBuf>> {
        validate_name(name)?;
        let path = self.path_of(name);
        Ok(path.exists().then_some(path))
    }

    /// Records `source` as the snapshot `name`, replacing any previous one.
    ///
    /// A directory is copied recursively, keeping only the entries `filter`
    /// admits, and every empty directory gets a [`GITKEEPER`] file. Symbolic
    /// links are followed and their targets copied. A file is copied as is.
    ///
    /// # Arguments
    ///
    /// * `name` - Snapshot name
    /// * `source` - Received file or directory
    /// * `filter` - Entries to keep when copying a directory
    ///
    /// # Returns
    ///
    /// The path of the written snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid, the source does not exist or
    /// copying fails.
    pub fn write(&self, name: &str, source: &Path, filter: &PathFilter) -> Result<PathBuf> {
        validate_name(name)?;
        if !source.exists() {
            return Err(direq_core::Error::NotFound(source.to_path_buf()).into());
        }

        let target = self.path_of(name);
        remove_entry(&target)?;
        fs::create_dir_all(&self.dir)?;

        if source.is_dir() {
            copy_tree(source, &target, filter)?;
            keep_empty_dirs(&target)?;
        } else {
            fs::copy(source, &target)?;
        }
        tracing::info!(name = %name, target = %target.display(), "snapshot written");
        Ok(target)
    }

    /// Deletes the snapshot `name`, file or tree.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NotFound`] if no such snapshot exists.
    pub fn delete(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        let path = self.path_of(name);
        if !remove_entry(&path)? {
            return Err(SnapshotError::NotFound(name.to_string()));
        }
        tracing::info!(name = %name, "snapshot deleted");
        Ok(())
    }

    /// Lists snapshots whose name is not in `used`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be listed.
    pub fn unused(&self, used: &HashSet<String>) -> Result<Vec<Snapshot>> {
        Ok(self
            .discover()?
            .into_iter()
            .filter(|snapshot| !used.contains(&snapshot.name))
            .collect())
    }

    /// Executes a closure while holding an exclusive lock on the store.
    ///
    /// Blocks until concurrent holders release the lock.
    ///
    /// # Arguments
    ///
    /// * `f` - The closure to execute while holding the lock
    ///
    /// # Returns
    ///
    /// The result of the closure execution.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The store directory or lock file cannot be created
    /// - The lock cannot be acquired
    /// - The closure returns an error
    pub fn with_lock<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        use fs2::FileExt;

        fs::create_dir_all(&self.dir)?;
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(self.dir.join(LOCK_FILE))?;
        lock_file.lock_exclusive()?;

        let result = f();

        let _ = lock_file.unlock();
        result
    }
}

/// Removes a file or directory tree. Returns whether anything was removed.
fn remove_entry(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path)?,
        Ok(_) => fs::remove_file(path)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    }
    Ok(true)
}

fn copy_tree(source: &Path, target: &Path, filter: &PathFilter) -> Result<()> {
    let walker = WalkDir::new(source)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            if filter.is_ignored_name(entry.file_name()) {
                return false;
            }
            let rel = match entry.path().strip_prefix(source) {
                Ok(rel) => rel,
                Err(_) => return false,
            };
            if entry.file_type().is_dir() {
                // Walk errors resurface below when the tree is copied.
                filter.admits_tree(entry.path(), rel).unwrap_or(true)
            } else {
                filter.admits_file(rel)
            }
        });

    for entry in walker {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| SnapshotError::InvalidLocation(e.to_string()))?;
        let destination = target.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)?;
        } else {
            fs::copy(entry.path(), &destination)?;
        }
    }
    Ok(())
}

fn keep_empty_dirs(root: &Path) -> Result<()> {
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_dir() && fs::read_dir(entry.path())?.next().is_none() {
            fs::write(entry.path().join(GITKEEPER), "")?;
        }
    }
    Ok(())
}
