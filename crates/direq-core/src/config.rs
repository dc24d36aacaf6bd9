// Rust guideline compliant 2026-10-19

//! Configuration management for direq.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE: &str = "direq.toml";

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Color when writing to a terminal and colors are not disabled.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl std::str::FromStr for ColorMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(crate::Error::InvalidConfig(format!(
                "color must be auto, always, or never, got '{}'",
                other
            ))),
        }
    }
}

/// Configuration for comparison, rendering and snapshot storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of context lines around each diff hunk.
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,

    /// Color mode for rendered diffs.
    #[serde(default)]
    pub color: ColorMode,

    /// Whether whitespace-only changes are shown with visible glyphs.
    #[serde(default = "default_visible_whitespace")]
    pub visible_whitespace: bool,

    /// Extra file name globs ignored on both sides.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Name of the directory holding snapshots next to a test module.
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,

    /// Whether snapshot assertions rewrite snapshots instead of comparing.
    #[serde(default)]
    pub update: bool,
}

fn default_context_lines() -> usize {
    3
}

fn default_visible_whitespace() -> bool {
    true
}

fn default_snapshot_dir() -> String {
    "__snapshots__".to_string()
}

/// Upper bound for `context_lines`.
const MAX_CONTEXT_LINES: usize = 100;

impl Default for Config {
    fn default() -> Self {
        Self {
            context_lines: default_context_lines(),
            color: ColorMode::default(),
            visible_whitespace: default_visible_whitespace(),
            ignore: Vec::new(),
            snapshot_dir: default_snapshot_dir(),
            update: false,
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file `direq.toml` in `dir`
    /// 3. Environment variables with `DIREQ_` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(dir: &Path) -> Result<Self> {
        Self::load_file(&dir.join(CONFIG_FILE))
    }

    /// Loads configuration from an explicit file path, then applies
    /// environment overrides. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            config = toml::from_str(&content).map_err(|e| {
                crate::Error::InvalidConfig(format!("Invalid config file: {}", e))
            })?;
            tracing::debug!(path = %path.display(), "loaded config file");
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `DIREQ_CONTEXT_LINES` - Context lines per hunk
    /// - `DIREQ_COLOR` - auto/always/never
    /// - `DIREQ_VISIBLE_WHITESPACE` - true/false
    /// - `DIREQ_SNAPSHOT_DIR` - Snapshot directory name
    /// - `DIREQ_UPDATE` - Rewrite snapshots (true/false/1/0)
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("DIREQ_CONTEXT_LINES") {
            self.context_lines = val.parse().map_err(|_| {
                crate::Error::InvalidConfig(
                    "DIREQ_CONTEXT_LINES must be a positive number".to_string(),
                )
            })?;
        }

        if let Ok(val) = std::env::var("DIREQ_COLOR") {
            self.color = val.parse()?;
        }

        if let Ok(val) = std::env::var("DIREQ_VISIBLE_WHITESPACE") {
            self.visible_whitespace = parse_bool("DIREQ_VISIBLE_WHITESPACE", &val)?;
        }

        if let Ok(val) = std::env::var("DIREQ_SNAPSHOT_DIR") {
            self.snapshot_dir = val;
        }

        if let Ok(val) = std::env::var("DIREQ_UPDATE") {
            self.update = parse_bool("DIREQ_UPDATE", &val)?;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - context_lines exceeds the supported maximum
    /// - snapshot_dir is empty or contains a path separator
    pub fn validate(&self) -> Result<()> {
        if self.context_lines > MAX_CONTEXT_LINES {
            return Err(crate::Error::InvalidConfig(format!(
                "context_lines must be at most {}, got {}",
                MAX_CONTEXT_LINES, self.context_lines
            )));
        }

        if self.snapshot_dir.is_empty() || self.snapshot_dir.contains(['/', '\\']) {
            return Err(crate::Error::InvalidConfig(format!(
                "snapshot_dir must be a plain directory name, got '{}'",
                self.snapshot_dir
            )));
        }

        Ok(())
    }

    /// Saves the configuration as `direq.toml` in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            crate::Error::InvalidConfig(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(dir.join(CONFIG_FILE), content)?;
        Ok(())
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(crate::Error::InvalidConfig(format!(
            "{} must be true or false",
            name
        ))),
    }
}
