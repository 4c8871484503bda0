//! Pinchmouse CLI: replay hand traces through the pointer pipeline.
//!
//! Usage:
//!   pinchmouse replay <TRACE>    Run a hand trace and emit device actions
//!   pinchmouse simulate          Write a synthetic hand trace
//!   pinchmouse config [--save]   Show (and optionally save) the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "pinchmouse",
    about = "Hand-gesture pointer control: smoothing, cursor motion, and pinch click/drag",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone)]
pub struct TuningArgs {
    /// Config file (JSON). Defaults to the standard location.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tuning preset: ultra-smooth|balanced|responsive
    #[arg(long)]
    preset: Option<String>,

    /// Override the screen width (pixels)
    #[arg(long)]
    screen_width: Option<f64>,

    /// Override the screen height (pixels)
    #[arg(long)]
    screen_height: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a hand trace and emit device actions as JSONL
    Replay {
        /// Path to the trace (JSONL)
        trace: PathBuf,

        /// Output file for device actions (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Write a deterministic synthetic hand trace
    Simulate {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Frame rate of the synthetic capture loop
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Trace duration in seconds
        #[arg(long, default_value = "6.0")]
        seconds: f64,
    },

    /// Validate and print the effective configuration
    Config {
        #[command(flatten)]
        tuning: TuningArgs,

        /// Write the effective configuration to the standard location
        #[arg(long)]
        save: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    pinchmouse_common::logging::init_logging(&pinchmouse_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: cli.json_logs,
    });

    match cli.command {
        Commands::Replay {
            trace,
            output,
            tuning,
        } => commands::replay::run(trace, output, &tuning),
        Commands::Simulate {
            output,
            fps,
            seconds,
        } => commands::simulate::run(output, fps, seconds),
        Commands::Config { tuning, save } => commands::config::run(&tuning, save),
    }
}
