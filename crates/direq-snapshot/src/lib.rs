// Rust guideline compliant 2026-10-19

//! direq Snapshot Library
//!
//! Directory and file snapshots for tests:
//! - Test locations and snapshot naming
//! - On-disk snapshot store (discover, read, write, delete, prune)
//! - Snapshot assertions with an update mode
//!
//! ```no_run
//! let mut snapshot = direq_snapshot::snapshot!("test_render_site").expect("Failed to locate");
//! direq_snapshot::assert_dir_snapshot!(snapshot, "target/site");
//! ```

pub mod assertion;
pub mod error;
pub mod location;
pub mod store;

pub use assertion::{Outcome, SnapshotAssertion};
pub use error::{Result, SnapshotError};
pub use location::{SnapshotNamer, TestLocation};
pub use store::{Snapshot, SnapshotKind, SnapshotStore, LOCK_FILE};

/// Creates a [`SnapshotAssertion`] for the named test in the calling file.
///
/// Expands to a `Result<SnapshotAssertion>`.
#[macro_export]
macro_rules! snapshot {
    ($test_name:expr) => {
        $crate::SnapshotAssertion::for_test(
            ::std::path::Path::new(env!("CARGO_MANIFEST_DIR")),
            file!(),
            $test_name,
        )
    };
}

/// Panics with the rendered diff unless `path` matches the next snapshot.
#[macro_export]
macro_rules! assert_dir_snapshot {
    ($assertion:expr, $path:expr $(,)?) => {
        match $assertion.assert_match($path) {
            Ok(_) => {}
            Err(e) => panic!("{}", e),
        }
    };
}
