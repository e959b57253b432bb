//! counterhist - histograms of per-language code complexity counters
//!
//! A CLI tool that reads the JSON counter reports written by the
//! complexity analyzer, aggregates them into one table per language,
//! and renders a histogram for each selected metric of one language.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (unreadable or malformed report, missing key or column, bad config)

mod analysis;
mod cli;
mod config;
mod errors;
mod models;
mod report;
mod scanner;

use analysis::{aggregate, plot_language, LanguageTables};
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use models::{PlotMetadata, PlotReport};
use scanner::{LoadOutcome, ReportScanner, ScanConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Where the effective configuration came from.
#[derive(Debug)]
enum ConfigSource {
    Explicit(PathBuf),
    WorkingDir,
    BuiltIn,
    /// The default file exists but could not be loaded.
    Broken(anyhow::Error),
}

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config(Path::new(CONFIG_FILE_NAME));
    }

    // Config is read before logging starts so it can raise the level
    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(log_level(&args, &config));

    info!("counterhist v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    match source {
        ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
        ConfigSource::WorkingDir => info!("Loaded default config from {}", CONFIG_FILE_NAME),
        ConfigSource::BuiltIn => debug!("No config file found, using defaults"),
        ConfigSource::Broken(e) => warn!("Failed to load config: {:#}", e),
    }

    if let Err(e) = run(&args, &config) {
        error!("Run failed: {:#}", e);
        eprintln!("\nError: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default config file.
fn handle_init_config(path: &Path) -> Result<()> {
    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            path.display()
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Created {} with default settings.", path.display());
    println!("   Edit it to choose the report pattern, language and metrics.");
    Ok(())
}

/// Quiet wins; otherwise either the flag or the config file enables debug.
fn log_level(args: &Args, config: &Config) -> tracing::Level {
    if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    }
}

/// Initialize logging on stderr, leaving stdout to the histograms.
///
/// `COUNTERHIST_LOG` overrides the level with a full filter directive.
fn init_logging(level: tracing::Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .with_env_var("COUNTERHIST_LOG")
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // An explicit path must load
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::Explicit(config_path.clone())));
    }

    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::WorkingDir)),
        Ok(None) => Ok((Config::default(), ConfigSource::BuiltIn)),
        Err(e) => Ok((Config::default(), ConfigSource::Broken(e))),
    }
}

/// Run the load, aggregate and plot workflow.
fn run(args: &Args, config: &Config) -> Result<()> {
    config.validate()?;

    let mut scan_config = ScanConfig::from(&config.input);
    scan_config.show_progress = !args.quiet;
    let scanner = ReportScanner::new(scan_config);

    // Handle --dry-run: discover files and exit
    if args.dry_run {
        return handle_dry_run(&scanner);
    }

    let outcome = scanner
        .load()
        .context("Failed to load counter reports")?;
    info!(
        "Loaded {} reports from {} ({} skipped)",
        outcome.reports.len(),
        scanner.pattern(),
        outcome.skipped.len()
    );

    for skipped in &outcome.skipped {
        warn!("Skipped {}: {}", skipped.path.display(), skipped.error);
    }
    for loaded in &outcome.reports {
        debug!(
            "{}: {} languages",
            loaded.path.display(),
            loaded.report.counters_by_language.len()
        );
    }

    let tables = aggregate(outcome.reports.iter().map(|loaded| &loaded.report));
    debug!(
        "Collected tables for {} languages: {:?}",
        tables.len(),
        tables.languages()
    );

    // Handle --list: describe the tables and exit
    if args.list {
        print!("{}", generate_listing(&tables));
        return Ok(());
    }

    let report = build_report(config, &outcome, &tables)?;
    let output = match args.format {
        OutputFormat::Text => report::generate_text_report(&report, config.plot.width),
        OutputFormat::Markdown => report::generate_markdown_report(&report, config.plot.width),
    };
    print!("{}", output);

    info!(
        "Rendered {} histograms for '{}'",
        report.figures.len(),
        config.plot.language
    );
    Ok(())
}

/// Build every figure for the configured language.
fn build_report(
    config: &Config,
    outcome: &LoadOutcome,
    tables: &LanguageTables,
) -> Result<PlotReport> {
    let language = &config.plot.language;
    let figures = plot_language(tables, language, &config.plot.metrics, config.plot.bins)?;

    let metadata = PlotMetadata {
        pattern: config.input.pattern.clone(),
        language: language.clone(),
        files_loaded: outcome.reports.len(),
        files_skipped: outcome.skipped.len(),
        rows: tables.get(language).len(),
        generated_at: Utc::now(),
    };

    Ok(PlotReport { metadata, figures })
}

/// Handle --dry-run: print the files that would be loaded.
fn handle_dry_run(scanner: &ReportScanner) -> Result<()> {
    println!("Dry run: matching {}\n", scanner.pattern());

    let files = scanner.discover()?;

    if files.is_empty() {
        println!("   No matching report files found.");
    } else {
        for file in &files {
            println!("     {}", file.display());
        }
        println!("\n   Total: {} files", files.len());
    }

    Ok(())
}

/// Languages with their row counts and columns.
fn generate_listing(tables: &LanguageTables) -> String {
    if tables.is_empty() {
        return "No languages found.\n".to_string();
    }

    let mut listing = String::new();
    for (language, table) in tables.iter() {
        listing.push_str(&format!("{} ({} rows)\n", language, table.len()));
        for column in table.columns() {
            listing.push_str(&format!("  {}\n", column));
        }
    }
    listing
}
