pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod render;

pub use cli::{Cli, Command};
pub use config::{ConfigError, DeskConfig, InvoiceSettings};
