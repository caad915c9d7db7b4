//! Command-line interface for portprobe.
//!
//! Uses `clap` derive macros for declarative argument parsing. `execute`
//! drives one scan: settings, range validation, resolution, probing, output.

use crate::config::ProbeSettings;
use crate::error::{CliResult, ConfigError};
use crate::output;
use crate::scanner::{run_scan, ScanConfig, ScanReport};
use crate::types::{PortRange, TargetSpec};
use chrono::Local;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

/// Probe a host's TCP ports one at a time and report which accept connections.
#[derive(Parser, Debug)]
#[command(name = "portprobe")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Target IPv4 address or hostname
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// First port to probe [default: 50]
    #[arg(short = 's', long, value_parser = clap::value_parser!(u16).range(1..))]
    pub start_port: Option<u16>,

    /// First port NOT probed; the range is [start, end) [default: 85]
    #[arg(short = 'e', long, value_parser = clap::value_parser!(u16).range(1..))]
    pub end_port: Option<u16>,

    /// Connect timeout per port in milliseconds [default: 1000]
    #[arg(short = 't', long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Path to a settings file (JSON)
    #[arg(long, value_name = "PATH", env = "PORTPROBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Decorative text file printed before the scan
    #[arg(long, value_name = "PATH")]
    pub logo: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print results
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// How a run ended, when it did not fail.
#[derive(Debug)]
pub enum Outcome {
    Completed(ScanReport),
    Interrupted,
}

impl Args {
    /// Resolve settings: file values first, then command-line overrides.
    pub fn settings(&self) -> CliResult<ProbeSettings> {
        let base = match &self.config {
            Some(path) => ProbeSettings::load_from(path)?,
            None => match ProbeSettings::load() {
                Ok(settings) => settings,
                Err(ConfigError::DirectoryNotFound) => {
                    output::print_warning(
                        "no configuration directory found, using default settings",
                    );
                    ProbeSettings::default()
                }
                Err(e) => return Err(e.into()),
            },
        };

        Ok(base.merge(self.timeout, self.start_port, self.end_port))
    }
}

/// Run one scan, stopping early on Ctrl-C.
pub async fn execute(args: &Args) -> CliResult<Outcome> {
    execute_until(args, tokio::signal::ctrl_c()).await
}

/// Run one scan until it finishes or `interrupt` resolves with `Ok`.
///
/// If the interrupt source fails, the scan keeps running to completion.
async fn execute_until<F>(args: &Args, interrupt: F) -> CliResult<Outcome>
where
    F: Future<Output = io::Result<()>>,
{
    let interrupted = async {
        match interrupt.await {
            Ok(()) => info!("interrupted by user"),
            Err(e) => {
                warn!(error = %e, "cannot listen for Ctrl-C, scan is not interruptible");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        result = run(args) => result.map(Outcome::Completed),
        () = interrupted => Ok(Outcome::Interrupted),
    }
}

async fn run(args: &Args) -> CliResult<ScanReport> {
    let settings = args.settings()?;

    // Range and timeout are checked before anything touches the network.
    let range: PortRange = settings.port_range()?;
    settings.validate()?;

    let spec = TargetSpec::parse(&args.target)?;
    let target = spec.resolve().await?;

    let config = ScanConfig::new(target, range).with_timeout(settings.timeout());
    config.validate()?;

    if !args.quiet {
        output::print_logo(args.logo.as_deref());
        output::print_scan_header(&config.target, Local::now());
    }

    let progress = (!args.quiet).then(|| progress_bar(range.len() as u64));
    let prober = config.prober();

    let report = run_scan(&prober, config.target, config.range, progress.as_ref()).await;
    if let (Err(_), Some(pb)) = (&report, &progress) {
        pb.abandon();
    }
    Ok(report?)
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template(
        "{prefix} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    ) {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb.set_prefix("Scanning...");
    pb
}
