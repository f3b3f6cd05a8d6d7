use super::commands::{ConfigCommands, KeysCommand, PlaygroundCommand};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "overleash-dashboard")]
#[command(about = "Keyboard controller for the overleash flag dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Drive the controller against a local flag page in the terminal
    Playground(PlaygroundCommand),
    /// Print the keyboard shortcuts
    Keys(KeysCommand),
    /// Configuration file management
    Config(ConfigCommands),
}
