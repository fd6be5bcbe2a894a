//! Errors specific to the npm registry collaborator.

use pkgid_core::PkgIdError;
use thiserror::Error;

/// Errors specific to talking to the npm registry.
#[derive(Error, Debug)]
pub enum NpmError {
    /// Package not found on npm registry
    #[error("Package '{package}' not found on npm registry")]
    PackageNotFound { package: String },

    /// npm registry request failed
    #[error("npm registry request failed for '{target}': {source}")]
    RegistryError {
        target: String,
        #[source]
        source: PkgIdError,
    },

    /// Failed to deserialize npm API response
    #[error("Failed to parse npm API response for '{target}': {source}")]
    ApiResponseError {
        target: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for npm operations.
pub type Result<T> = std::result::Result<T, NpmError>;

impl NpmError {
    /// Create a registry error, folding 404s into `PackageNotFound`.
    pub fn registry_error(target: impl Into<String>, error: PkgIdError) -> Self {
        let target = target.into();
        if error.is_not_found() {
            Self::PackageNotFound { package: target }
        } else {
            Self::RegistryError {
                target,
                source: error,
            }
        }
    }

    /// Create an API response error.
    pub fn api_response_error(target: impl Into<String>, error: serde_json::Error) -> Self {
        Self::ApiResponseError {
            target: target.into(),
            source: error,
        }
    }
}

/// Convert to pkgid_core::PkgIdError for the `Registry` trait
impl From<NpmError> for PkgIdError {
    fn from(err: NpmError) -> Self {
        match err {
            NpmError::PackageNotFound { package } => PkgIdError::HttpStatus {
                status: 404,
                url: package,
            },
            NpmError::RegistryError { source, .. } => source,
            NpmError::ApiResponseError { source, .. } => PkgIdError::Json(source),
        }
    }
}
