use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use boilerswap::config::{Settings, SettingsOverrides};
use boilerswap::core::OutputFormat;
use boilerswap::refactor::PathFilter;
use boilerswap::validate::RunRequest;

mod commands;

#[derive(Parser)]
#[command(name = "boilerswap")]
#[command(author, version)]
#[command(
    about = "Create a new entity from a boilerplate module",
    long_about = "Copies every file of the boilerplate module whose path mentions its \
                  placeholder name, renaming each case variant of the singular and plural \
                  names in paths and contents.\n\n\
                  Example: boilerswap -s fooBar -p fooBars"
)]
struct Cli {
    /// Singular name of the new entity, e.g. fooBar
    #[arg(short, long)]
    singular: Option<String>,

    /// Plural name of the new entity; repeat without --singular for a batch
    #[arg(short, long)]
    plural: Vec<String>,

    /// Directory holding the boilerplate module
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Singular placeholder name used by the boilerplate
    #[arg(long)]
    source_singular: Option<String>,

    /// Plural placeholder name used by the boilerplate
    #[arg(long)]
    source_plural: Option<String>,

    /// Only write destinations containing this text
    #[arg(long, conflicts_with = "filter_rx")]
    filter: Option<String>,

    /// Only write destinations matching this regular expression
    #[arg(long)]
    filter_rx: Option<String>,

    /// Overwrite existing files
    #[arg(long)]
    force: bool,

    /// Plan and check everything but write nothing
    #[arg(long, visible_alias = "dry")]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Also create renamed directories, even empty ones
    #[arg(long)]
    include_dirs: bool,

    /// Abort if more than this many paths match
    #[arg(long)]
    hard_max_files: Option<usize>,

    #[arg(long)]
    min_name_length: Option<usize>,

    #[arg(long)]
    max_name_length: Option<usize>,

    /// Largest allowed length difference between singular and plural
    #[arg(long)]
    max_name_diff: Option<usize>,

    #[arg(long)]
    max_scan_depth: Option<usize>,

    /// Settings file to use instead of ./boilerswap.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "boilerswap=debug" } else { "boilerswap=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    let settings = SettingsOverrides {
        source_dir: cli.source_dir,
        source_singular: cli.source_singular,
        source_plural: cli.source_plural,
        hard_max_files: cli.hard_max_files,
        min_name_length: cli.min_name_length,
        max_name_length: cli.max_name_length,
        max_name_diff: cli.max_name_diff,
        max_scan_depth: cli.max_scan_depth,
    }
    .apply(settings);

    let filter = match (cli.filter, cli.filter_rx) {
        (Some(text), _) => Some(PathFilter::Substring(text)),
        (None, Some(expr)) => Some(PathFilter::pattern(&expr)?),
        (None, None) => None,
    };

    let request = RunRequest {
        target_singular: cli.singular,
        target_plural: None,
        settings,
        filter,
        force: cli.force,
        dry_run: cli.dry_run,
        include_dirs: cli.include_dirs,
    };

    commands::generate::run(request, cli.plural, cli.format, cli.verbose)
}
