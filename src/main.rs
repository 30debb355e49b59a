//! texinvert CLI
//!
//! Inverts the red, green and blue channels of every PNG texture directly
//! inside a directory, leaving alpha untouched, and overwrites each file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use texinvert_core::logging::{self, TracingConfig};
use texinvert_core::{BatchReport, FailurePolicy, ListingOrder};
use texinvert_export::{InvertOptions, TextureInverter};

/// texinvert - batch colour-channel inverter for PNG textures
#[derive(Parser, Debug)]
#[command(name = "texinvert")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the textures (not searched recursively)
    directory: PathBuf,

    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Process files in file-name order instead of directory order
    #[arg(long)]
    sorted: bool,

    /// Keep going after a file fails and report all failures at the end
    #[arg(long)]
    keep_going: bool,

    /// Dry run - show what would be inverted
    #[arg(long)]
    dry_run: bool,

    /// Output format for the summary
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl Cli {
    fn invert_options(&self) -> InvertOptions {
        InvertOptions {
            order: if self.sorted { ListingOrder::Name } else { ListingOrder::Listing },
            policy: if self.keep_going { FailurePolicy::Continue } else { FailurePolicy::Abort },
            dry_run: self.dry_run,
        }
    }

    fn tracing_config(&self) -> TracingConfig {
        if self.quiet {
            TracingConfig {
                default_level: "warn".to_string(),
                ..TracingConfig::default()
            }
        } else {
            TracingConfig::from_verbosity(self.verbose)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_with_config(cli.tracing_config());

    let options = cli.invert_options();
    debug!(?options, "Starting batch");

    let report = TextureInverter::with_options(options)
        .invert_all(&cli.directory)
        .with_context(|| format!("Failed to invert textures in {}", cli.directory.display()))?;

    print_report(&report, cli.format, cli.dry_run)?;

    report.into_result().context("Batch finished with failures")?;
    Ok(())
}

fn print_report(report: &BatchReport, format: OutputFormat, dry_run: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Text if dry_run => {
            println!("Dry run - would invert {} files:", report.total());
            for outcome in &report.outcomes {
                println!("  {}", outcome.path.display());
            }
        }
        OutputFormat::Text => {
            println!("Inversion complete:");
            println!("  Inverted: {}", report.inverted());
            println!("  Failed:   {}", report.failed());
            println!("  Written:  {}", format_size(report.bytes_written()));

            for outcome in report.failures() {
                println!(
                    "  ! {}: {}",
                    outcome.path.display(),
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
