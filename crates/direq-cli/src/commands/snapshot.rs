// Rust guideline compliant 2026-10-19

//! Implementation of the `direq snapshot` commands.
//!
//! Manages the snapshots stored in one snapshot directory: checking received
//! data against them, recording, listing, deleting and pruning.

use crate::commands::FilterArgs;
use crate::context::CliContext;
use crate::output::OutputFormatter;
use crate::terminal::{print_success, print_warning};
use anyhow::Result;
use direq_core::{compare_paths, Options};
use direq_snapshot::{Snapshot, SnapshotStore};
use std::collections::HashSet;
use std::path::Path;

/// Checks `received` against the snapshot `name`.
///
/// # Returns
///
/// `true` if the received data differs from the snapshot.
///
/// # Errors
///
/// Returns an error if:
/// - The snapshot does not exist
/// - The received path does not exist
/// - Files cannot be read
pub fn check(
    store: &SnapshotStore,
    name: &str,
    received: &Path,
    filter: &FilterArgs,
    context: &CliContext,
    formatter: &dyn OutputFormatter,
) -> Result<bool> {
    let Some(snapshot) = store.read(name)? else {
        anyhow::bail!(
            "Snapshot '{}' not found in {}. Run 'direq snapshot update' first.",
            name,
            store.dir().display()
        );
    };

    let options = Options {
        filter: filter.build(&context.config)?,
        renderer: context.renderer(),
        context: context.config.context_lines,
    };
    let diff = compare_paths(received, &snapshot, &options)?;
    let different = diff.is_different()?;

    if formatter.is_json() {
        println!("{}", formatter.format_diff(&[], &diff.summary()?));
    } else if different {
        let lines = diff.diff_lines(&options.renderer)?;
        println!("{}", formatter.format_diff(&lines, &diff.summary()?));
    } else {
        print_success(&format!("{} matches snapshot '{}'", received.display(), name));
    }
    Ok(different)
}

/// Records `received` as the snapshot `name`, replacing any previous one.
///
/// # Errors
///
/// Returns an error if the received path does not exist or cannot be copied.
pub fn update(
    store: &SnapshotStore,
    name: &str,
    received: &Path,
    filter: &FilterArgs,
    context: &CliContext,
) -> Result<()> {
    let filter = filter.build(&context.config)?;
    let target = store.with_lock(|| store.write(name, received, &filter))?;
    print_success(&format!("Snapshot '{}' written to {}", name, target.display()));
    Ok(())
}

/// Lists snapshots, optionally only those of one test.
///
/// # Errors
///
/// Returns an error if the snapshot directory cannot be listed.
pub fn list(
    store: &SnapshotStore,
    test: Option<&str>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let snapshots = match test {
        Some(test) => store.discover_for(test)?,
        None => store.discover()?,
    };
    println!("{}", formatter.format_snapshots(&snapshots));
    Ok(())
}

/// Deletes the snapshot `name`.
///
/// # Errors
///
/// Returns an error if the snapshot does not exist or cannot be removed.
pub fn delete(store: &SnapshotStore, name: &str) -> Result<()> {
    store.with_lock(|| store.delete(name))?;
    print_success(&format!("Snapshot '{}' deleted", name));
    Ok(())
}

/// Deletes every snapshot whose name is not in `keep`.
///
/// # Arguments
///
/// * `store` - Snapshot directory
/// * `keep` - Names of snapshots still in use
/// * `dry_run` - List the snapshots without deleting them
/// * `formatter` - Output formatter
///
/// # Returns
///
/// The pruned (or, in dry-run mode, prunable) snapshots.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or a snapshot cannot
/// be removed.
pub fn prune(
    store: &SnapshotStore,
    keep: &[String],
    dry_run: bool,
    formatter: &dyn OutputFormatter,
) -> Result<Vec<Snapshot>> {
    let keep: HashSet<String> = keep.iter().cloned().collect();
    let unused = store.with_lock(|| {
        let unused = store.unused(&keep)?;
        if !dry_run {
            for snapshot in &unused {
                store.delete(&snapshot.name)?;
            }
        }
        Ok(unused)
    })?;

    if formatter.is_json() {
        println!("{}", formatter.format_snapshots(&unused));
    } else if unused.is_empty() {
        print_success("No unused snapshots");
    } else if dry_run {
        print_warning(&format!("{} unused snapshot(s) would be deleted", unused.len()));
        println!("{}", formatter.format_snapshots(&unused));
    } else {
        print_success(&format!("Deleted {} unused snapshot(s)", unused.len()));
    }
    Ok(unused)
}
