//! dupsweep - find files in a compare folder that already exist in a base
//! folder, matched by file name and size, and optionally delete them.
//!
//! The core is a [`session::ScanSession`]: a base scan builds a
//! [`duplicates::DuplicateIndex`], compare scans are matched against it,
//! and deletion removes the reported files. Front ends drive a session
//! either directly (`dupsweep scan`) or over the JSON event channel in
//! [`events`] (`dupsweep serve`).

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod events;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod session;
pub mod signal;

use std::io::{self, Write};

use anyhow::Context;

use cli::{Cli, Commands, OutputFormat, ScanArgs};
use config::Config;
use error::ExitCode;
use events::{serve, Connection, JsonLinesSink};
use output::{CsvOutput, JsonOutput, ScanReport, TextOutput};
use progress::TerminalProgress;
use session::ScanSession;

/// Run the application for parsed arguments.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded, a scan cannot run,
/// or output cannot be written.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    log::debug!("Effective configuration: {:?}", config);

    match cli.command {
        Commands::Scan(args) => run_scan(&args, config, cli.quiet),
        Commands::Serve => run_serve(&config),
        Commands::Config => {
            let toml = config.to_toml().context("Failed to render configuration")?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(toml.as_bytes())?;
            Ok(ExitCode::Success)
        }
    }
}

/// CLI flags win over every configuration layer.
fn apply_overrides(mut config: Config, args: &ScanArgs) -> Config {
    if args.follow_symlinks {
        config.follow_symlinks = true;
    }
    if args.trash {
        config.use_trash = true;
    }
    if let Some(interval) = args.progress_interval {
        config.progress_interval = interval;
    }
    config
}

fn run_scan(args: &ScanArgs, config: Config, quiet: bool) -> anyhow::Result<ExitCode> {
    let config = apply_overrides(config, args);
    let shutdown = signal::install_handler();

    let mut session = ScanSession::new(config.walker_config(), config.delete_config())
        .with_shutdown_flag(shutdown.get_flag());
    let progress = TerminalProgress::new(quiet || args.output != OutputFormat::Text);

    let base_summary = session
        .run_base_scan(&args.base, &progress)
        .with_context(|| format!("Base folder scan failed: {}", args.base.display()))?;
    let compare_summary = session
        .run_compare_scan(&args.compare, &progress)
        .with_context(|| format!("Compare folder scan failed: {}", args.compare.display()))?;

    let deletion = if args.delete && !compare_summary.duplicates.is_empty() {
        Some(session.run_deletion(&compare_summary.duplicates))
    } else {
        None
    };

    let exit_code = match &deletion {
        Some(report) if !report.all_succeeded() => ExitCode::PartialSuccess,
        _ if compare_summary.duplicates.is_empty() => ExitCode::NoDuplicates,
        _ => ExitCode::Success,
    };

    let mut report = ScanReport::new(&args.base, &args.compare, &base_summary, &compare_summary);
    if let Some(deletion) = &deletion {
        report = report.with_deletion(deletion);
    }

    let mut stdout = io::stdout().lock();
    match args.output {
        OutputFormat::Text => TextOutput::new(&report).write_to(&mut stdout)?,
        OutputFormat::Json => JsonOutput::new(&report, exit_code).write_to(&mut stdout, true)?,
        OutputFormat::Csv => CsvOutput::new(&report).write_to(&mut stdout)?,
    }

    Ok(exit_code)
}

fn run_serve(config: &Config) -> anyhow::Result<ExitCode> {
    let session = ScanSession::new(config.walker_config(), config.delete_config());
    let mut connection = Connection::new(session, JsonLinesSink::new(io::stdout()));

    serve(io::stdin().lock(), &mut connection).context("Failed to read client messages")?;
    Ok(ExitCode::Success)
}
