pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use cli::{Cli, Command};
pub use commands::run;
pub use config::PkgIdConfig;
pub use error::{CliError, Result};
