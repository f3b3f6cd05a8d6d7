use anyhow::Result;
use clap::Parser;
use log::info;

mod cli;

use cli::commands::{config_command, keys_command, playground_command};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("overleash-dashboard.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting overleash-dashboard");

    match cli.command {
        Commands::Playground(args) => playground_command(args),
        Commands::Keys(args) => keys_command(args),
        Commands::Config(args) => config_command(args),
    }
}
