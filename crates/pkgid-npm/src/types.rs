use pkgid_core::SearchCandidate;
use serde::Serialize;

/// Package metadata from an npm search result.
///
/// Retrieved from `https://registry.npmjs.org/-/v1/search?text={query}`.
///
/// # Examples
///
/// ```
/// use pkgid_core::SearchCandidate;
/// use pkgid_npm::NpmPackage;
///
/// let pkg = NpmPackage {
///     name: "express".into(),
///     description: Some("Fast, unopinionated, minimalist web framework".into()),
///     homepage: Some("http://expressjs.com/".into()),
///     repository: Some("expressjs/express".into()),
///     latest_version: Some("4.18.2".into()),
/// };
///
/// let candidate = SearchCandidate::from(pkg);
/// assert_eq!(candidate.name, "express");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NpmPackage {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
}

impl From<NpmPackage> for SearchCandidate {
    fn from(pkg: NpmPackage) -> Self {
        Self {
            name: pkg.name,
            description: pkg.description,
        }
    }
}
