mod announcer;
mod eval;
mod play;
mod stats;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None, propagate_version = true)]
struct Cli {
    /// Log engine events at debug level (otherwise `RUST_LOG` decides, default warn)
    #[arg(short = 'v', long = "verbose", global = true, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommands,
}

#[derive(Debug, Subcommand)]
enum CliCommands {
    /// Run a five-card-draw stage between two to four players
    Play(play::PlayArgs),
    /// Generate tier statistics for random five-card hands
    Stats(stats::StatsArgs),
    /// Evaluate and rank hands given as card identifiers
    Eval(eval::EvalArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        CliCommands::Play(args) => play::run(args),
        CliCommands::Stats(args) => stats::run(args),
        CliCommands::Eval(args) => eval::run(args),
    }
}
