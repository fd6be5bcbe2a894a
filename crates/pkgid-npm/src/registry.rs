//! npm registry client.
//!
//! Provides access to the npm registry via:
//! - Package document (<https://registry.npmjs.org/{package}>) for existence probes
//! - Search API (<https://registry.npmjs.org/-/v1/search>) for package search
//!
//! Nothing is cached; every call goes to the network.

use crate::error::{NpmError, Result};
use crate::types::NpmPackage;
use pkgid_core::{
    HttpClient, Registry, SearchCandidate, SimilarityOptions, SimilarityResult, find_similar,
};
use serde::Deserialize;

/// Public npm registry.
pub const REGISTRY_BASE: &str = "https://registry.npmjs.org";

/// Base URL for package pages on npmjs.com
pub const NPMJS_URL: &str = "https://www.npmjs.com/package";

/// Largest page the npm search API will return.
pub const MAX_SEARCH_SIZE: usize = 250;

/// Percent-encodes a package name for use as a single URL path segment.
///
/// The leading `@` of a scoped name stays literal and the scope separator is
/// encoded, so `@vue/core` becomes `@vue%2Fcore`.
///
/// # Examples
///
/// ```
/// use pkgid_npm::encode_package_name;
///
/// assert_eq!(encode_package_name("@vue/core"), "@vue%2Fcore");
/// assert_eq!(encode_package_name("some-package"), "some-package");
/// ```
pub fn encode_package_name(name: &str) -> String {
    match name.strip_prefix('@') {
        Some(rest) => format!("@{}", urlencoding::encode(rest)),
        None => urlencoding::encode(name).into_owned(),
    }
}

/// Returns the URL for a package's page on npmjs.com.
pub fn package_url(name: &str) -> String {
    format!("{}/{}", NPMJS_URL, encode_package_name(name))
}

/// Client for interacting with the npm registry.
///
/// # Examples
///
/// ```no_run
/// # use pkgid_npm::NpmRegistry;
/// # use pkgid_core::{HttpClient, SimilarityOptions};
/// # #[tokio::main]
/// # async fn main() {
/// let registry = NpmRegistry::new(HttpClient::new().unwrap());
///
/// assert!(registry.package_exists("vue").await);
///
/// let similar = registry.find_similar("esbuild", &SimilarityOptions::default()).await;
/// assert_eq!(similar[0].name, "esbuild");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NpmRegistry {
    http: HttpClient,
    base_url: String,
}

impl NpmRegistry {
    /// Creates a client for the public npm registry.
    pub fn new(http: HttpClient) -> Self {
        Self::with_base_url(http, REGISTRY_BASE)
    }

    /// Creates a client for a mirror or a local test server.
    pub fn with_base_url(http: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks whether `name` is published, with a HEAD request on its document.
    ///
    /// Every failure (transport error, 404, any other non-2xx) is "no".
    pub async fn package_exists(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }

        let url = format!("{}/{}", self.base_url, encode_package_name(name));
        match self.http.head(&url).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("existence probe for '{}' failed: {}", name, e);
                false
            }
        }
    }

    /// Searches for packages by name/keywords.
    ///
    /// Returns up to `limit` results in registry relevance order. `limit` is
    /// clamped to `1..=250`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - HTTP request fails or returns a non-2xx status
    /// - JSON parsing fails
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<NpmPackage>> {
        let url = format!(
            "{}/-/v1/search?text={}&size={}",
            self.base_url,
            urlencoding::encode(query),
            limit.clamp(1, MAX_SEARCH_SIZE)
        );

        let data = self
            .http
            .get_bytes(&url)
            .await
            .map_err(|e| NpmError::registry_error(query, e))?;

        let packages = parse_search_response(&data)
            .map_err(|e| NpmError::api_response_error(query, e))?;
        tracing::debug!("npm search '{}' returned {} packages", query, packages.len());

        Ok(packages)
    }

    /// Searches the registry and ranks the results by similarity to `query`.
    pub async fn find_similar(
        &self,
        query: &str,
        options: &SimilarityOptions,
    ) -> Vec<SimilarityResult> {
        find_similar(self, query, options).await
    }
}

/// Search response from npm registry.
#[derive(Deserialize)]
struct SearchResponse {
    objects: Vec<SearchObject>,
}

/// Search result object.
#[derive(Deserialize)]
struct SearchObject {
    package: SearchPackage,
}

/// Package information in search result.
#[derive(Deserialize)]
struct SearchPackage {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    links: Option<PackageLinks>,
    #[serde(default)]
    version: Option<String>,
}

/// Package links in search result.
#[derive(Deserialize)]
struct PackageLinks {
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    repository: Option<String>,
}

/// Parses JSON response from npm search API.
fn parse_search_response(data: &[u8]) -> serde_json::Result<Vec<NpmPackage>> {
    let response: SearchResponse = serde_json::from_slice(data)?;

    Ok(response
        .objects
        .into_iter()
        .map(|obj| {
            let pkg = obj.package;
            let (homepage, repository) = pkg
                .links
                .map(|l| (l.homepage, l.repository))
                .unwrap_or_default();
            NpmPackage {
                name: pkg.name,
                description: pkg.description,
                homepage,
                repository,
                latest_version: pkg.version,
            }
        })
        .collect())
}

#[async_trait::async_trait]
impl Registry for NpmRegistry {
    async fn search(&self, query: &str, limit: usize) -> pkgid_core::Result<Vec<SearchCandidate>> {
        let packages = self.search(query, limit).await?;
        Ok(packages.into_iter().map(SearchCandidate::from).collect())
    }

    async fn package_exists(&self, name: &str) -> bool {
        self.package_exists(name).await
    }

    fn package_url(&self, name: &str) -> String {
        package_url(name)
    }
}
