// Rust guideline compliant 2026-10-19

//! Settings shared by every command: configuration and global flags.

use anyhow::{Context as _, Result};
use direq_core::{ColorMode, Config, Renderer};
use std::path::{Path, PathBuf};

/// Global flags and the configuration they select.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Loaded configuration with flag overrides applied.
    pub config: Config,
    /// Whether JSON output was requested.
    pub json: bool,
    /// Whether stdout is a terminal.
    pub is_terminal: bool,
}

impl CliContext {
    /// Loads configuration and applies the global flags.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Explicit config file; `direq.toml` in the current
    ///   directory otherwise
    /// * `color` - `--color` value, if given
    /// * `no_color` - `--no-color` flag, wins over `--color`
    /// * `json` - `--json` flag
    /// * `is_terminal` - Whether stdout is a terminal
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or `color` is
    /// not a valid mode.
    pub fn load(
        config_path: Option<&Path>,
        color: Option<&str>,
        no_color: bool,
        json: bool,
        is_terminal: bool,
    ) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Config::load_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::load(Path::new(".")).context("Failed to load direq.toml")?,
        };

        if let Some(color) = color {
            config.color = color.parse()?;
        }
        if no_color || json {
            config.color = ColorMode::Never;
        }

        Ok(Self {
            config,
            json,
            is_terminal,
        })
    }

    /// Renderer for diff output.
    pub fn renderer(&self) -> Renderer {
        Renderer::from_config(&self.config, self.is_terminal)
    }

    /// Snapshot store directory: `dir` when given, the configured snapshot
    /// directory otherwise.
    pub fn snapshot_dir(&self, dir: Option<PathBuf>) -> PathBuf {
        dir.unwrap_or_else(|| PathBuf::from(&self.config.snapshot_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("direq.toml");
        std::fs::write(&path, "color = \"always\"\ncontext_lines = 5\n").unwrap();

        let context = CliContext::load(Some(&path), None, false, false, false).unwrap();
        assert_eq!(context.config.context_lines, 5);
        assert!(context.renderer().is_colored());

        let context = CliContext::load(Some(&path), None, true, false, false).unwrap();
        assert!(!context.renderer().is_colored());

        let context = CliContext::load(Some(&path), Some("never"), false, false, true).unwrap();
        assert_eq!(context.config.color, ColorMode::Never);
    }

    #[test]
    fn test_invalid_color_flag() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("direq.toml");
        let result = CliContext::load(Some(&path), Some("sometimes"), false, false, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_snapshot_dir_defaults_to_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("direq.toml");
        let context = CliContext::load(Some(&path), None, false, true, false).unwrap();
        assert_eq!(context.snapshot_dir(None), PathBuf::from("__snapshots__"));
        assert_eq!(
            context.snapshot_dir(Some(PathBuf::from("snaps"))),
            PathBuf::from("snaps")
        );
    }
}
