//! bpetrain - learn a BPE vocabulary from a text corpus.
//!
//! This is the main entry point for the `bpetrain` command-line tool.

mod commands;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use commands::TrainCommand;
use env_logger::Env;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "bpetrain")]
#[command(about = "Incremental byte-pair-encoding vocabulary trainer", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, global = true, action = ArgAction::Count)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn merges from a corpus and write the vocabulary
    Train(TrainCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;

    match cli.command {
        Commands::Train(cmd) => commands::train::run(cmd)?,
    }

    Ok(())
}

/// Log level forced by `-v`/`-q`, or `None` to defer to `RUST_LOG`.
fn verbosity(verbose: u8, quiet: u8) -> Option<LevelFilter> {
    match (quiet, verbose) {
        (0, 0) => None,
        (0, 1) => Some(LevelFilter::Debug),
        (0, _) => Some(LevelFilter::Trace),
        (1, _) => Some(LevelFilter::Warn),
        _ => Some(LevelFilter::Error),
    }
}

fn init_logging(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    if let Some(level) = verbosity(verbose, quiet) {
        builder.filter_level(level);
    }
    builder.try_init().context("failed to initialize logging")
}
