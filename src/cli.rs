//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation. Options left unset fall back to the
//! configuration file, then to built-in defaults.

use clap::Parser;
use std::path::PathBuf;

/// counterhist - histograms of per-language code complexity counters
///
/// Reads the JSON counter reports written by the complexity analyzer,
/// builds one table per language and draws a histogram for each
/// selected metric of one language.
///
/// Examples:
///   counterhist
///   counterhist --pattern 'reports/*.json' --language python
///   counterhist --metrics total_lines_of_code,average_keywords_complexity --bins 20
///   counterhist --list
///   counterhist --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Glob pattern matching counter report files
    ///
    /// Default: from config or /tmp/res/*.json
    #[arg(short, long, value_name = "GLOB", env = "COUNTERHIST_PATTERN")]
    pub pattern: Option<String>,

    /// Language whose metrics are plotted
    ///
    /// Default: from config or java
    #[arg(short, long, value_name = "LANG", env = "COUNTERHIST_LANGUAGE")]
    pub language: Option<String>,

    /// Metric columns to plot (comma-separated)
    ///
    /// Columns are counter names prefixed with their category,
    /// e.g. total_lines_of_code or average_keywords_complexity.
    #[arg(short, long, value_name = "METRICS", value_delimiter = ',')]
    pub metrics: Option<Vec<String>>,

    /// Number of histogram bins
    #[arg(long, value_name = "COUNT")]
    pub bins: Option<usize>,

    /// Width of the longest histogram bar, in terminal cells
    #[arg(long, value_name = "CELLS")]
    pub width: Option<usize>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .counterhist.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (text, markdown)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Skip unreadable or malformed report files instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// List the report files that would be loaded and exit
    #[arg(long, conflicts_with = "list")]
    pub dry_run: bool,

    /// List languages, row counts and columns, then exit
    #[arg(long)]
    pub list: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .counterhist.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the rendered histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Terminal bars (default)
    #[default]
    Text,
    /// Markdown tables
    Markdown,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref pattern) = self.pattern {
            if pattern.trim().is_empty() {
                return Err("Pattern must not be empty".to_string());
            }
        }

        if let Some(ref language) = self.language {
            if language.trim().is_empty() {
                return Err("Language must not be empty".to_string());
            }
        }

        if let Some(ref metrics) = self.metrics {
            if metrics.iter().any(|m| m.trim().is_empty()) {
                return Err("Metric names must not be empty".to_string());
            }
        }

        if self.bins == Some(0) {
            return Err("Bins must be at least 1".to_string());
        }

        if self.width == Some(0) {
            return Err("Width must be at least 1".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
