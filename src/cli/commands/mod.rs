pub mod config;
pub mod keys;
pub mod playground;

pub use config::{ConfigCommands, config_command};
pub use keys::{KeysCommand, keys_command};
pub use playground::{PlaygroundCommand, playground_command};
