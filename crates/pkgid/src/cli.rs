use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Package identity lookups against the npm registry.
#[derive(Debug, Parser)]
#[command(name = "pkgid", version, about)]
pub struct Cli {
    /// JSON config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Registry base URL, overrides the config file
    #[arg(long, global = true, value_name = "URL")]
    pub registry: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the normalized identity key of each name
    Normalize {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Report whether each name is an OS/architecture-specific package
    Platform {
        #[arg(required = true)]
        names: Vec<String>,
        #[arg(long)]
        json: bool,
    },

    /// List registry packages with names similar to QUERY, best match first
    Similar {
        query: String,
        /// Largest edit distance still reported as similar
        #[arg(long)]
        max_distance: Option<usize>,
        /// Number of search results to consider
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },

    /// Check whether a package is published; exits 1 if it is not
    Exists { name: String },

    /// Raw registry search
    Search {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
        /// Drop per-platform binary packages from the listing
        #[arg(long)]
        hide_platform: bool,
        #[arg(long)]
        json: bool,
    },
}
