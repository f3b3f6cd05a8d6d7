use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

use overleash_dashboard::config::DashboardConfig;

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Print where the configuration file is read from
    Path,
    /// Show the effective configuration as TOML
    Show {
        /// Read this file instead of the default location
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write the default configuration so it can be edited
    Init {
        /// Write to this file instead of the default location
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Load `path` when given, else the default location
pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::load_from(path),
        None => DashboardConfig::load(),
    }
}

pub fn config_command(args: ConfigCommands) -> Result<()> {
    match args.command {
        ConfigSubcommands::Path => {
            let path = DashboardConfig::get_config_path()?;
            let note = if path.exists() {
                "".normal()
            } else {
                " (not created, defaults apply)".bright_yellow()
            };
            println!("{}{}", path.display().to_string().bright_white().bold(), note);
        }
        ConfigSubcommands::Show { config } => {
            let config = load_config(config.as_deref())?;
            print!("{}", config.to_toml()?);
        }
        ConfigSubcommands::Init { config, force } => {
            let path = match config {
                Some(path) => path,
                None => DashboardConfig::get_config_path()?,
            };
            if path.exists() && !force {
                bail!("{} already exists, pass --force to overwrite", path.display());
            }
            DashboardConfig::default().save_to(&path)?;
            println!(
                "{} {}",
                "Wrote defaults to".bright_green(),
                path.display().to_string().bright_white().bold()
            );
        }
    }
    Ok(())
}
