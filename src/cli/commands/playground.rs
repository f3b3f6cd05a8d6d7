use anyhow::Result;
use clap::Args;
use log::info;
use std::path::PathBuf;

use overleash_dashboard::playground;

use super::config::load_config;

#[derive(Args)]
pub struct PlaygroundCommand {
    /// Read this file instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Number of demo flags on the page
    #[arg(short, long, default_value_t = 24)]
    pub flags: usize,
}

pub fn playground_command(args: PlaygroundCommand) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    info!(
        "Starting playground with {} flags, modifier {}",
        args.flags,
        config.keys.modifier.label()
    );
    playground::run(config, args.flags)
}
