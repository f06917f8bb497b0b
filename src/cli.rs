//! Command-line interface definitions.
//!
//! ```bash
//! # Report files in ~/Backup that already exist in ~/Photos
//! dupsweep scan ~/Photos ~/Backup
//!
//! # Same, as JSON, then move the duplicates to the trash
//! dupsweep scan ~/Photos ~/Backup --output json --delete --trash --yes
//!
//! # Drive a session over stdin/stdout
//! dupsweep serve
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Find files in one folder that already exist in another, by name and size.
#[derive(Debug, Parser)]
#[command(name = "dupsweep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Configuration file (layered over the platform config file)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a base folder, then report its duplicates in a compare folder
    Scan(ScanArgs),
    /// Run one session over JSON lines on stdin/stdout
    Serve,
    /// Print the effective configuration as TOML
    Config,
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Folder whose files are indexed
    #[arg(value_name = "BASE")]
    pub base: PathBuf,

    /// Folder searched for files already present in BASE
    #[arg(value_name = "COMPARE")]
    pub compare: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Delete the reported duplicates from COMPARE
    #[arg(long, requires = "yes")]
    pub delete: bool,

    /// Confirm deletion without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Move deleted files to the system trash instead of unlinking them
    #[arg(long)]
    pub trash: bool,

    /// Follow symbolic links during scan
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Files between two progress updates
    #[arg(long, value_name = "N", value_parser = parse_interval)]
    pub progress_interval: Option<usize>,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report with colors
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Parse a progress interval, which must be at least 1.
///
/// ```
/// use dupsweep::cli::parse_interval;
///
/// assert_eq!(parse_interval("250").unwrap(), 250);
/// assert!(parse_interval("0").is_err());
/// ```
///
/// # Errors
///
/// Returns an error for anything but a positive integer.
pub fn parse_interval(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: '{s}'"))?;
    if n == 0 {
        return Err("Progress interval must be at least 1".to_string());
    }
    Ok(n)
}
