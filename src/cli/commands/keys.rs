use anyhow::Result;
use clap::Args;
use colored::*;
use std::path::PathBuf;

use overleash_dashboard::controller::{SHORTCUTS, shortcuts::format_binding};

use super::config::load_config;

#[derive(Args)]
pub struct KeysCommand {
    /// Read this file instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn keys_command(args: KeysCommand) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let modifier = config.keys.modifier.label();

    println!("  {}", "Keyboard shortcuts:".bright_white().bold());
    println!();
    for entry in SHORTCUTS {
        let keys = format_binding(entry, modifier);
        println!("    {} {}", format!("{:<12}", keys).bright_cyan().bold(), entry.description);
    }
    println!();
    println!(
        "  {} keys marked {}+ only work while {} is held",
        "ℹ".bright_blue(),
        modifier.bright_cyan(),
        modifier
    );
    Ok(())
}
