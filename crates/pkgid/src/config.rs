use crate::error::{CliError, Result};
use pkgid_core::SimilarityOptions;
use pkgid_core::http::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use pkgid_npm::REGISTRY_BASE;
use pkgid_npm::registry::MAX_SEARCH_SIZE;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Root configuration for pkgid.
///
/// Read from an optional JSON file. All fields use sensible defaults if not
/// specified.
///
/// # Examples
///
/// ```
/// use pkgid::config::PkgIdConfig;
///
/// let json = r#"{
///     "registry": { "base_url": "https://registry.npmmirror.com" },
///     "similarity": { "max_edit_distance": 1 }
/// }"#;
///
/// let config: PkgIdConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.registry.base_url, "https://registry.npmmirror.com");
/// assert_eq!(config.similarity.max_edit_distance, 1);
/// assert_eq!(config.similarity.search_limit, 20);
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PkgIdConfig {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default, deserialize_with = "deserialize_similarity")]
    pub similarity: SimilarityOptions,
}

impl PkgIdConfig {
    /// Loads configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self =
            serde_json::from_str(&content).map_err(|source| CliError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

/// Registry endpoint and HTTP client settings.
///
/// # Defaults
///
/// - `base_url`: `"https://registry.npmjs.org"`
/// - `timeout_secs`: `10`
/// - `user_agent`: `"pkgid/<version>"`
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl RegistryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    REGISTRY_BASE.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Keeps search_limit within what the npm search API accepts.
fn validate_similarity(mut options: SimilarityOptions) -> SimilarityOptions {
    let clamped = options.search_limit.clamp(1, MAX_SEARCH_SIZE);
    if clamped != options.search_limit {
        tracing::warn!(
            "search_limit {} out of range 1..={}, using {}",
            options.search_limit,
            MAX_SEARCH_SIZE,
            clamped
        );
        options.search_limit = clamped;
    }
    options
}

/// Custom deserializer for similarity options that validates search_limit
fn deserialize_similarity<'de, D>(deserializer: D) -> std::result::Result<SimilarityOptions, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let options = SimilarityOptions::deserialize(deserializer)?;
    Ok(validate_similarity(options))
}
