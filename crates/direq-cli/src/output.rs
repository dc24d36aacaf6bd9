// Rust guideline compliant 2026-10-19

//! Output formatting module for the direq CLI.
//!
//! Comparison summaries and snapshot listings are printed either as
//! human-readable tables or as JSON for machine consumption.

use direq_core::DiffSummary;
use direq_snapshot::{Snapshot, SnapshotKind};
use serde_json::json;
use tabled::{builder::Builder, settings::Style};

/// Output formatter trait.
pub trait OutputFormatter {
    /// Formats the rendered diff lines and summary of a comparison.
    ///
    /// # Arguments
    /// * `lines` - Rendered diff lines
    /// * `summary` - Relative paths of every difference
    fn format_diff(&self, lines: &[String], summary: &DiffSummary) -> String;

    /// Formats a list of snapshots.
    fn format_snapshots(&self, snapshots: &[Snapshot]) -> String;

    /// Formats an error message for display.
    fn format_error(&self, error: &str) -> String;

    /// Whether this formatter emits machine-readable output.
    fn is_json(&self) -> bool {
        false
    }
}

/// JSON output formatter.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_diff(&self, _lines: &[String], summary: &DiffSummary) -> String {
        let output = json!({
            "different": !summary.is_empty(),
            "summary": summary,
        });
        serde_json::to_string_pretty(&output)
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize summary" }).to_string())
    }

    fn format_snapshots(&self, snapshots: &[Snapshot]) -> String {
        let output = json!({
            "snapshots": snapshots,
            "total": snapshots.len(),
        });
        serde_json::to_string_pretty(&output)
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize snapshots" }).to_string())
    }

    fn format_error(&self, error: &str) -> String {
        json!({ "error": error }).to_string()
    }

    fn is_json(&self) -> bool {
        true
    }
}

/// Table output formatter.
pub struct TableFormatter;

impl OutputFormatter for TableFormatter {
    fn format_diff(&self, lines: &[String], _summary: &DiffSummary) -> String {
        lines.join("\n")
    }

    fn format_snapshots(&self, snapshots: &[Snapshot]) -> String {
        if snapshots.is_empty() {
            return "No snapshots found.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(vec!["Name", "Kind", "Path"]);
        for snapshot in snapshots {
            let kind = match snapshot.kind {
                SnapshotKind::File => "file",
                SnapshotKind::Directory => "directory",
            };
            builder.push_record(vec![
                snapshot.name.clone(),
                kind.to_string(),
                snapshot.path.display().to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }
}

/// Creates the formatter for the requested output mode.
///
/// # Arguments
/// * `json` - Whether JSON output was requested
///
/// # Returns
/// A boxed OutputFormatter instance
pub fn create_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter)
    }
}
