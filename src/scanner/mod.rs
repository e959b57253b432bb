//! Counter report discovery and loading.
//!
//! Reports are found by expanding a glob pattern, then read and parsed
//! one by one in discovery order.

use crate::errors::LoadError;
use crate::models::CounterReport;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default location of analyzer output.
pub const DEFAULT_PATTERN: &str = "/tmp/res/*.json";

/// Configuration for report scanning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Glob pattern matching report files.
    pub pattern: String,
    /// Skip unreadable or invalid files instead of aborting.
    pub skip_invalid: bool,
    /// Draw a progress bar on stderr while loading.
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            skip_invalid: false,
            show_progress: false,
        }
    }
}

impl From<&crate::config::InputConfig> for ScanConfig {
    fn from(config: &crate::config::InputConfig) -> Self {
        Self {
            pattern: config.pattern.clone(),
            skip_invalid: config.skip_invalid,
            show_progress: false,
        }
    }
}

/// A parsed report and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedReport {
    pub path: PathBuf,
    pub report: CounterReport,
}

/// A file that was skipped, with the reason.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: LoadError,
}

/// Result of loading every discovered report.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub reports: Vec<LoadedReport>,
    pub skipped: Vec<SkippedFile>,
}

/// Discovers and parses counter reports.
pub struct ReportScanner {
    config: ScanConfig,
}

impl ReportScanner {
    /// Create a new report scanner.
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn pattern(&self) -> &str {
        &self.config.pattern
    }

    /// Expand the pattern to regular files, in glob order.
    ///
    /// With `skip_invalid`, paths that cannot be read during expansion are
    /// left out instead of failing.
    pub fn discover(&self) -> Result<Vec<PathBuf>, LoadError> {
        let (files, unreadable) = self.expand()?;
        for skipped in &unreadable {
            debug!("Ignoring unreadable match: {}", skipped.path.display());
        }
        Ok(files)
    }

    fn expand(&self) -> Result<(Vec<PathBuf>, Vec<SkippedFile>), LoadError> {
        let entries = glob::glob(&self.config.pattern).map_err(|source| LoadError::Pattern {
            pattern: self.config.pattern.clone(),
            source,
        })?;

        let mut files = Vec::new();
        let mut unreadable = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    let path = e.path().to_path_buf();
                    let error = LoadError::Io {
                        path: path.clone(),
                        source: e.into_error(),
                    };
                    if !self.config.skip_invalid {
                        return Err(error);
                    }
                    unreadable.push(SkippedFile { path, error });
                    continue;
                }
            };

            if path.is_file() {
                debug!("Discovered report: {}", path.display());
                files.push(path);
            } else {
                debug!("Ignoring non-file match: {}", path.display());
            }
        }

        Ok((files, unreadable))
    }

    /// Read and parse every discovered report.
    ///
    /// The first failure aborts unless `skip_invalid` is set, in which
    /// case per-file failures are collected in the outcome.
    pub fn load(&self) -> Result<LoadOutcome, LoadError> {
        let (paths, unreadable) = self.expand()?;
        let pb = self.progress_bar(paths.len() as u64);

        let mut outcome = LoadOutcome {
            skipped: unreadable,
            ..LoadOutcome::default()
        };
        for path in paths {
            pb.set_message(file_label(&path));

            match load_report(&path) {
                Ok(report) => outcome.reports.push(LoadedReport { path, report }),
                Err(error) if self.config.skip_invalid && error.is_per_file() => {
                    debug!("Skipping {}: {}", path.display(), error);
                    outcome.skipped.push(SkippedFile { path, error });
                }
                Err(error) => {
                    pb.abandon();
                    return Err(error);
                }
            }

            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(outcome)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}

/// Read one report file from disk.
pub fn load_report(path: &Path) -> Result<CounterReport, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_report(path, &bytes)
}

/// Parse report bytes, separating malformed JSON from missing keys.
///
/// Counter values that are not numbers do not fail the parse.
pub fn parse_report(path: &Path, bytes: &[u8]) -> Result<CounterReport, LoadError> {
    serde_json::from_slice(bytes).map_err(|source| {
        let path = path.to_path_buf();
        match source.classify() {
            serde_json::error::Category::Data => LoadError::Schema { path, source },
            _ => LoadError::Parse { path, source },
        }
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
