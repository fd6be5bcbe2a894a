use thiserror::Error;

/// Core error types for pkgid.
///
/// The engine functions (`normalize`, `is_platform_specific`, `find_similar`)
/// never produce these. They only surface from the registry collaborator
/// layer: HTTP transport, response status and payload decoding.
///
/// # Examples
///
/// ```
/// use pkgid_core::error::{PkgIdError, Result};
///
/// fn require_name(name: &str) -> Result<&str> {
///     if name.is_empty() {
///         return Err(PkgIdError::InvalidUrl("empty package name".into()));
///     }
///     Ok(name)
/// }
///
/// assert!(require_name("").is_err());
/// ```
#[derive(Error, Debug)]
pub enum PkgIdError {
    #[error("registry request failed for {url}: {source}")]
    RegistryError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PkgIdError {
    /// Returns `true` when the registry answered with 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::HttpStatus { status: 404, .. })
    }
}

/// Convenience type alias for `Result<T, PkgIdError>`.
pub type Result<T> = std::result::Result<T, PkgIdError>;
