//! cmodel: command-line driver for the counter simulation model.
//!
//! Provides `cmodel run` to drive one or more counter instances through the
//! configured stimulus and `cmodel info` to list the instance's scopes and
//! signals.

#![warn(missing_docs)]

mod info;
mod logger;
mod run;
mod settings;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// cmodel: simulate a synchronous 16-bit counter.
#[derive(Parser, Debug)]
#[command(name = "cmodel", version, about = "Counter simulation model")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a `cmodel.toml` file or the directory holding it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Drive the counter through reset and counting cycles.
    Run(RunArgs),
    /// List the scopes and signals of a counter instance.
    Info,
}

/// Arguments for `cmodel run`. Each flag overrides the settings file.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Counting cycles after reset.
    #[arg(short, long)]
    pub cycles: Option<u32>,

    /// Cycles with reset held high.
    #[arg(long)]
    pub reset_cycles: Option<u32>,

    /// Keep `EN` low after reset.
    #[arg(long)]
    pub no_enable: bool,

    /// Number of independent instances to run in parallel.
    #[arg(short, long)]
    pub instances: Option<usize>,

    /// Clock frequency, e.g. "50MHz".
    #[arg(long)]
    pub clock: Option<String>,

    /// Output format for the recorded snapshots.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Snapshot output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per clock edge.
    Text,
    /// JSON array of run reports.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print debug information.
    pub verbose: bool,
    /// Optional settings file or directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose) {
        eprintln!("warning: logging unavailable: {e}");
    }

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Run(ref args) => run::run(args, &global),
        Command::Info => info::run(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
