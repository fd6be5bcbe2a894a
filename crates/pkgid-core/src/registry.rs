use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A package returned by a registry search.
///
/// Only the fields the similarity engine needs: the name it scores and the
/// description it passes through to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SearchCandidate {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }
}

/// Package registry collaborator.
///
/// Implementors talk to a concrete registry (npm, a mirror, a test double).
/// The identity engine only ever calls [`Registry::search`]; existence checks
/// and page URLs are offered to surrounding application code.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use pkgid_core::{Registry, SearchCandidate};
///
/// struct FixedRegistry(Vec<SearchCandidate>);
///
/// #[async_trait]
/// impl Registry for FixedRegistry {
///     async fn search(&self, _query: &str, limit: usize) -> pkgid_core::Result<Vec<SearchCandidate>> {
///         Ok(self.0.iter().take(limit).cloned().collect())
///     }
///
///     async fn package_exists(&self, name: &str) -> bool {
///         self.0.iter().any(|c| c.name == name)
///     }
///
///     fn package_url(&self, name: &str) -> String {
///         format!("https://example.com/package/{}", name)
///     }
/// }
/// ```
#[async_trait]
pub trait Registry: Send + Sync {
    /// Free-text search, returning up to `limit` candidates in registry order.
    ///
    /// # Errors
    ///
    /// Returns error if the network request or response parsing fails.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchCandidate>>;

    /// Lightweight existence probe.
    ///
    /// Any failure, including a 404, means "does not exist".
    async fn package_exists(&self, name: &str) -> bool;

    /// URL of the package's page on the registry website.
    fn package_url(&self, name: &str) -> String;
}
