//! Minimal HTTP transport for registry collaborators.
//!
//! Wraps a shared `reqwest::Client` with a fixed user agent and timeout.
//! Responses are never cached here; every call goes to the network.

use crate::error::{PkgIdError, Result};
use reqwest::Client;
use std::time::Duration;

/// Default request timeout for registry calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("pkgid/", env!("CARGO_PKG_VERSION"));

/// Rejects anything that is not an absolute http(s) URL.
#[inline]
fn ensure_http_url(url: &str) -> Result<()> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(PkgIdError::InvalidUrl(url.to_string()))
    }
}

/// HTTP client used by registry implementations.
///
/// Cloning is cheap: `reqwest::Client` is reference counted internally.
///
/// # Examples
///
/// ```no_run
/// use pkgid_core::http::HttpClient;
///
/// # async fn example() -> pkgid_core::error::Result<()> {
/// let client = HttpClient::new()?;
/// let body = client.get_bytes("https://registry.npmjs.org/-/v1/search?text=vue").await?;
/// println!("Fetched {} bytes", body.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with [`DEFAULT_USER_AGENT`] and [`DEFAULT_TIMEOUT`].
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom user agent and timeout.
    pub fn with_options(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(PkgIdError::Client)?;

        Ok(Self { client })
    }

    /// Performs a GET request and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns `PkgIdError::HttpStatus` for non-2xx responses and
    /// `PkgIdError::RegistryError` if the request itself fails.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        ensure_http_url(url)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PkgIdError::RegistryError {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PkgIdError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PkgIdError::RegistryError {
                url: url.to_string(),
                source: e,
            })?;

        Ok(body.to_vec())
    }

    /// Performs a HEAD request, succeeding only on a 2xx status.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::get_bytes`]; a 404 is reported as
    /// `PkgIdError::HttpStatus { status: 404, .. }`.
    pub async fn head(&self, url: &str) -> Result<()> {
        ensure_http_url(url)?;
        tracing::debug!("HEAD {}", url);

        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| PkgIdError::RegistryError {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(PkgIdError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            })
        }
    }
}
