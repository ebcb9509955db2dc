mod cli;
mod commands;

use std::io;

use cli::{Cli, Commands};
use commands::{bias, history, preread, score, upload};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Score(args) => score::run(&cli, args),
        Commands::Preread(args) => preread::run(&cli, args),
        Commands::Upload(args) => upload::run(&cli, args),
        Commands::History(args) => history::run(&cli, args),
        Commands::Bias(args) => bias::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
