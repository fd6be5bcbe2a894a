use std::path::PathBuf;
use thiserror::Error;

/// Error types for the pkgid binary.
///
/// The identity engine itself never fails; these cover configuration
/// loading, registry client setup and writing output.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Core(#[from] pkgid_core::PkgIdError),

    #[error(transparent)]
    Npm(#[from] pkgid_npm::NpmError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for `Result<T, CliError>`.
pub type Result<T> = std::result::Result<T, CliError>;
