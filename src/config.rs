//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.counterhist.toml` files.

use crate::analysis::{DEFAULT_BINS, DEFAULT_LANGUAGE, DEFAULT_METRICS};
use crate::scanner::DEFAULT_PATTERN;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".counterhist.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report input settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Plot settings.
    #[serde(default)]
    pub plot: PlotConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Where counter reports are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Glob pattern matching report files.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Skip invalid report files with a warning instead of aborting.
    #[serde(default)]
    pub skip_invalid: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            skip_invalid: false,
        }
    }
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

/// Which metrics are plotted and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Language whose table is plotted.
    #[serde(default = "default_language")]
    pub language: String,

    /// Metric columns, one histogram each, in order.
    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,

    /// Number of histogram bins.
    #[serde(default = "default_bins")]
    pub bins: usize,

    /// Width of the longest bar, in terminal cells.
    #[serde(default = "default_width")]
    pub width: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            metrics: default_metrics(),
            bins: default_bins(),
            width: default_width(),
        }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_metrics() -> Vec<String> {
    DEFAULT_METRICS.iter().map(|m| m.to_string()).collect()
}

fn default_bins() -> usize {
    DEFAULT_BINS
}

fn default_width() -> usize {
    40
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.counterhist.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref pattern) = args.pattern {
            self.input.pattern = pattern.clone();
        }
        if args.skip_invalid {
            self.input.skip_invalid = true;
        }

        if let Some(ref language) = args.language {
            self.plot.language = language.clone();
        }
        if let Some(ref metrics) = args.metrics {
            self.plot.metrics = metrics.clone();
        }
        if let Some(bins) = args.bins {
            self.plot.bins = bins;
        }
        if let Some(width) = args.width {
            self.plot.width = width;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check values that serde cannot constrain.
    pub fn validate(&self) -> Result<()> {
        if self.plot.language.trim().is_empty() {
            anyhow::bail!("Plot language must not be empty");
        }
        if self.plot.metrics.is_empty() {
            anyhow::bail!("At least one metric must be selected");
        }
        if self.plot.metrics.iter().any(|m| m.trim().is_empty()) {
            anyhow::bail!("Metric names must not be empty");
        }
        if self.plot.bins == 0 {
            anyhow::bail!("Bins must be at least 1");
        }
        if self.plot.width == 0 {
            anyhow::bail!("Width must be at least 1");
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
