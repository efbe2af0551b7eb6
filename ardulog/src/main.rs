//!
//! Command-line entry point for decoding ArduPilot binary flight logs.
//!
//! This is glue, not part of the core contract (see spec §1/§6): it parses
//! arguments, wires them into [`ardulog_parallel::DecodeOptions`], runs the
//! decode, and prints a summary. Output serialization is deliberately minimal.
//!

mod result;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use ardulog_parallel::{decode, DecodeOptions, ExecutionMode};
use result::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    ParallelWorker,
    CooperativeThread,
}

impl From<ModeArg> for ExecutionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::ParallelWorker => ExecutionMode::ParallelWorker,
            ModeArg::CooperativeThread => ExecutionMode::CooperativeThread,
        }
    }
}

/// Decode an ArduPilot binary flight log (`.bin`) into a timestamp-ordered sequence
/// of structured records.
#[derive(Debug, Parser)]
#[command(name = "ardulog", author, version, about)]
struct Cli {
    /// Path to the `.bin` log file to decode.
    file_path: PathBuf,

    /// Number of segments/workers to split the file into.
    #[arg(long, default_value_t = 1)]
    workers: usize,

    /// Round configured fields (Lat, Lng, Alt, Roll, Pitch, Yaw) to 3 decimal places.
    #[arg(long, default_value_t = false)]
    round_floats: bool,

    /// Worker dispatch strategy.
    #[arg(long, value_enum, default_value_t = ModeArg::ParallelWorker)]
    mode: ModeArg,

    /// Restrict output to these message-type names (repeatable). Default: keep all.
    #[arg(long = "only")]
    only: Vec<String>,

    /// Collect and print non-fatal diagnostics alongside the decoded sequence.
    #[arg(long, default_value_t = false)]
    warnings: bool,

    /// Print one debug-formatted line per decoded message, not just the summary.
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("ardulog: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = DecodeOptions {
        worker_count: cli.workers.max(1),
        round_floats: cli.round_floats,
        mode: cli.mode.into(),
        name_filter: if cli.only.is_empty() { None } else { Some(cli.only) },
        collect_warnings: cli.warnings,
        ..Default::default()
    };

    let started = Instant::now();
    let outcome = decode(&cli.file_path, &options).map_err(Error::from)?;
    let elapsed = started.elapsed();

    log::info!(
        "decoded {} messages from {} in {:.3}s",
        outcome.messages.len(),
        cli.file_path.display(),
        elapsed.as_secs_f64()
    );

    if cli.verbose {
        for message in &outcome.messages {
            println!("{message:?}");
        }
    }

    println!(
        "decoded {} messages ({} warnings) from {} in {:.3}s",
        outcome.messages.len(),
        outcome.warnings.len(),
        cli.file_path.display(),
        elapsed.as_secs_f64()
    );

    if cli.warnings {
        for warning in &outcome.warnings {
            eprintln!("warning: {warning}");
        }
    }

    Ok(())
}
