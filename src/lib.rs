pub mod actions;
pub mod config;
pub mod controller;
pub mod dom;
pub mod playground;
pub mod theme;

pub use controller::{Controller, Disposition, InputEvent, ReplacedRegion};
