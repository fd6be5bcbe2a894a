//! Similarity ranking of registry search results.
//!
//! Candidates are graded against a query name into three tiers:
//! an identical raw name, an identical normalized key, or a normalized key
//! within a small edit distance. Everything else is dropped.

use crate::normalize::normalize;
use crate::registry::{Registry, SearchCandidate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Largest edit distance between normalized keys still graded `similar`.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

/// Number of candidates requested from the registry per search.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// How closely a candidate name matches the query.
///
/// Ordered from strongest to weakest, so sorting ascending puts exact
/// matches first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityTier {
    /// Raw names are identical.
    ExactMatch,
    /// Same normalized key, different spelling.
    VerySimilar,
    /// Normalized keys within the edit distance threshold.
    Similar,
}

impl SimilarityTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExactMatch => "exact-match",
            Self::VerySimilar => "very-similar",
            Self::Similar => "similar",
        }
    }
}

impl std::fmt::Display for SimilarityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ranked candidate returned by [`find_similar`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub similarity: SimilarityTier,
}

/// Tunables for similarity search.
///
/// # Defaults
///
/// - `max_edit_distance`: `2`
/// - `search_limit`: `20`
///
/// # Examples
///
/// ```
/// use pkgid_core::SimilarityOptions;
///
/// let options: SimilarityOptions = serde_json::from_str(r#"{"search_limit": 50}"#).unwrap();
/// assert_eq!(options.search_limit, 50);
/// assert_eq!(options.max_edit_distance, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SimilarityOptions {
    #[serde(default = "default_max_edit_distance")]
    pub max_edit_distance: usize,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

impl Default for SimilarityOptions {
    fn default() -> Self {
        Self {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

const fn default_max_edit_distance() -> usize {
    DEFAULT_MAX_EDIT_DISTANCE
}

const fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

/// Levenshtein distance over chars, unit cost for insert, delete and substitute.
///
/// Uses a single rolling row of the DP table.
///
/// # Examples
///
/// ```
/// use pkgid_core::similarity::edit_distance;
///
/// assert_eq!(edit_distance("kitten", "sitting"), 3);
/// assert_eq!(edit_distance("", "abc"), 3);
/// ```
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, cb) in b_chars.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != *cb);
            row[j + 1] = (diagonal + cost).min(above + 1).min(row[j] + 1);
            diagonal = above;
        }
    }

    row[b_chars.len()]
}

/// Scores candidates against one query.
///
/// Normalizes the query once so scoring a whole result set does not repeat
/// that work per candidate.
#[derive(Debug, Clone)]
pub struct SimilarityScorer<'q> {
    query: &'q str,
    normalized_query: String,
    max_edit_distance: usize,
}

impl<'q> SimilarityScorer<'q> {
    pub fn new(query: &'q str) -> Self {
        Self::with_max_edit_distance(query, DEFAULT_MAX_EDIT_DISTANCE)
    }

    pub fn with_max_edit_distance(query: &'q str, max_edit_distance: usize) -> Self {
        Self {
            query,
            normalized_query: normalize(query),
            max_edit_distance,
        }
    }

    /// Grades `candidate`, or returns `None` if it is excluded.
    pub fn score(&self, candidate: &str) -> Option<SimilarityTier> {
        if candidate == self.query {
            return Some(SimilarityTier::ExactMatch);
        }

        let normalized = normalize(candidate);
        if normalized == self.normalized_query {
            return Some(SimilarityTier::VerySimilar);
        }

        (edit_distance(&normalized, &self.normalized_query) <= self.max_edit_distance)
            .then_some(SimilarityTier::Similar)
    }
}

/// Grades `candidate` against `query` with the default threshold.
///
/// # Examples
///
/// ```
/// use pkgid_core::{SimilarityTier, score_similarity};
///
/// assert_eq!(score_similarity("esbuild", "esbuild"), Some(SimilarityTier::ExactMatch));
/// assert_eq!(score_similarity("esbuild", "es-build"), Some(SimilarityTier::VerySimilar));
/// assert_eq!(score_similarity("esbuild", "sebuild"), Some(SimilarityTier::Similar));
/// assert_eq!(score_similarity("esbuild", "absolute-nonsense"), None);
/// ```
pub fn score_similarity(query: &str, candidate: &str) -> Option<SimilarityTier> {
    SimilarityScorer::new(query).score(candidate)
}

/// Scores, deduplicates and orders search candidates.
///
/// Excluded candidates are dropped, repeated names keep their first
/// occurrence, and the stable sort keeps registry order within a tier.
pub fn rank_candidates<I>(query: &str, candidates: I, max_edit_distance: usize) -> Vec<SimilarityResult>
where
    I: IntoIterator<Item = SearchCandidate>,
{
    let scorer = SimilarityScorer::with_max_edit_distance(query, max_edit_distance);
    let mut seen = HashSet::new();

    let mut results: Vec<SimilarityResult> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let similarity = scorer.score(&candidate.name)?;
            Some(SimilarityResult {
                name: candidate.name,
                description: candidate.description,
                similarity,
            })
        })
        .filter(|result| seen.insert(result.name.clone()))
        .collect();

    results.sort_by_key(|result| result.similarity);
    results
}

/// Searches `registry` for `query` and returns the similar packages, best first.
///
/// Makes exactly one registry call. A failed search is logged and reported
/// as an empty list, the same as a search with no similar packages.
///
/// # Examples
///
/// ```no_run
/// # use pkgid_core::{Registry, SimilarityOptions, find_similar};
/// # async fn example(registry: &dyn Registry) {
/// let results = find_similar(registry, "esbuild", &SimilarityOptions::default()).await;
/// for result in results {
///     println!("{} ({})", result.name, result.similarity);
/// }
/// # }
/// ```
pub async fn find_similar<R>(
    registry: &R,
    query: &str,
    options: &SimilarityOptions,
) -> Vec<SimilarityResult>
where
    R: Registry + ?Sized,
{
    let candidates = match registry.search(query, options.search_limit).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::warn!("similar package search failed for '{}': {}", query, e);
            return Vec::new();
        }
    };

    let total = candidates.len();
    let results = rank_candidates(query, candidates, options.max_edit_distance);
    tracing::debug!(
        "{} of {} candidates similar to '{}'",
        results.len(),
        total,
        query
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PkgIdError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockRegistry {
        response: Option<Vec<SearchCandidate>>,
        calls: Mutex<Vec<(String, usize)>>,
    }

    impl MockRegistry {
        fn returning(names: &[&str]) -> Self {
            Self {
                response: Some(
                    names
                        .iter()
                        .map(|name| SearchCandidate::new(*name, None))
                        .collect(),
                ),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_candidates(candidates: Vec<SearchCandidate>) -> Self {
            Self {
                response: Some(candidates),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                response: None,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Registry for MockRegistry {
        async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchCandidate>> {
            self.calls.lock().unwrap().push((query.to_string(), limit));
            self.response.clone().ok_or_else(|| PkgIdError::HttpStatus {
                status: 503,
                url: "mock://search".into(),
            })
        }

        async fn package_exists(&self, _name: &str) -> bool {
            false
        }

        fn package_url(&self, name: &str) -> String {
            format!("mock://{}", name)
        }
    }

    fn tiers(results: &[SimilarityResult]) -> Vec<(&str, SimilarityTier)> {
        results
            .iter()
            .map(|r| (r.name.as_str(), r.similarity))
            .collect()
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("esbuild", "esbuild"), 0);
        assert_eq!(edit_distance("esbuild", "sebuild"), 2);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("lodash", "lodahs"), 2);
    }

    #[test]
    fn test_edit_distance_symmetric() {
        for (a, b) in [("react", "preact"), ("vue", "vuex"), ("", "x"), ("svelte", "svetle")] {
            assert_eq!(edit_distance(a, b), edit_distance(b, a));
        }
    }

    #[test]
    fn test_tier_ordering() {
        assert!(SimilarityTier::ExactMatch < SimilarityTier::VerySimilar);
        assert!(SimilarityTier::VerySimilar < SimilarityTier::Similar);
    }

    #[test]
    fn test_tier_serialization() {
        assert_eq!(
            serde_json::to_string(&SimilarityTier::VerySimilar).unwrap(),
            "\"very-similar\""
        );
        assert_eq!(SimilarityTier::ExactMatch.to_string(), "exact-match");
    }

    #[test]
    fn test_score_similarity() {
        assert_eq!(
            score_similarity("esbuild", "esbuild"),
            Some(SimilarityTier::ExactMatch)
        );
        assert_eq!(
            score_similarity("esbuild", "es-build"),
            Some(SimilarityTier::VerySimilar)
        );
        assert_eq!(
            score_similarity("esbuild", "sebuild"),
            Some(SimilarityTier::Similar)
        );
        assert_eq!(score_similarity("esbuild", "absolute-nonsense"), None);
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        assert_eq!(
            score_similarity("esbuild", "ESBuild"),
            Some(SimilarityTier::VerySimilar)
        );
        assert_eq!(
            score_similarity("my_pkg", "my-pkg"),
            Some(SimilarityTier::VerySimilar)
        );
        assert_eq!(
            score_similarity("vue", "@vue/vue"),
            Some(SimilarityTier::VerySimilar)
        );
    }

    #[test]
    fn test_distance_uses_normalized_keys() {
        // "Es_Bui.ld" differs from "esbuild" only by case and separators
        assert_eq!(
            score_similarity("esbuild", "Es_Bui.ld"),
            Some(SimilarityTier::VerySimilar)
        );
        // "esbuilds" vs "esbuild" is one insertion after normalization
        assert_eq!(
            score_similarity("esbuild", "ES-BUILDS"),
            Some(SimilarityTier::Similar)
        );
    }

    #[test]
    fn test_custom_threshold() {
        let strict = SimilarityScorer::with_max_edit_distance("esbuild", 1);
        assert_eq!(strict.score("sebuild"), None);
        assert_eq!(strict.score("esbuilt"), Some(SimilarityTier::Similar));

        let exact_only = SimilarityScorer::with_max_edit_distance("esbuild", 0);
        assert_eq!(exact_only.score("esbuilt"), None);
        assert_eq!(exact_only.score("es.build"), Some(SimilarityTier::VerySimilar));
    }

    #[test]
    fn test_rank_candidates_orders_by_tier() {
        let candidates = ["sebuild", "esbuild", "es-build"]
            .into_iter()
            .map(|name| SearchCandidate::new(name, None));

        let results = rank_candidates("esbuild", candidates, DEFAULT_MAX_EDIT_DISTANCE);

        assert_eq!(
            tiers(&results),
            vec![
                ("esbuild", SimilarityTier::ExactMatch),
                ("es-build", SimilarityTier::VerySimilar),
                ("sebuild", SimilarityTier::Similar),
            ]
        );
    }

    #[test]
    fn test_rank_candidates_stable_within_tier() {
        let candidates = ["esbuilt", "es-build", "sebuild", "ES_BUILD", "esbuild-js"]
            .into_iter()
            .map(|name| SearchCandidate::new(name, None));

        let results = rank_candidates("esbuild", candidates, DEFAULT_MAX_EDIT_DISTANCE);

        assert_eq!(
            tiers(&results),
            vec![
                ("es-build", SimilarityTier::VerySimilar),
                ("ES_BUILD", SimilarityTier::VerySimilar),
                ("esbuild-js", SimilarityTier::VerySimilar),
                ("esbuilt", SimilarityTier::Similar),
                ("sebuild", SimilarityTier::Similar),
            ]
        );
    }

    #[test]
    fn test_rank_candidates_deduplicates() {
        let candidates = vec![
            SearchCandidate::new("esbuild", Some("first".into())),
            SearchCandidate::new("es-build", None),
            SearchCandidate::new("esbuild", Some("second".into())),
        ];

        let results = rank_candidates("esbuild", candidates, DEFAULT_MAX_EDIT_DISTANCE);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "esbuild");
        assert_eq!(results[0].description.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_find_similar_ordering() {
        let registry = MockRegistry::returning(&["sebuild", "esbuild", "es-build"]);

        let results = find_similar(&registry, "esbuild", &SimilarityOptions::default()).await;

        assert_eq!(
            results,
            vec![
                SimilarityResult {
                    name: "esbuild".into(),
                    description: None,
                    similarity: SimilarityTier::ExactMatch,
                },
                SimilarityResult {
                    name: "es-build".into(),
                    description: None,
                    similarity: SimilarityTier::VerySimilar,
                },
                SimilarityResult {
                    name: "sebuild".into(),
                    description: None,
                    similarity: SimilarityTier::Similar,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_find_similar_keeps_descriptions() {
        let registry = MockRegistry::with_candidates(vec![
            SearchCandidate::new("svel-te", Some("spe-ed".into())),
            SearchCandidate::new("svelte", Some("speed.".into())),
        ]);

        let results = find_similar(&registry, "svelte", &SimilarityOptions::default()).await;

        assert_eq!(
            results,
            vec![
                SimilarityResult {
                    name: "svelte".into(),
                    description: Some("speed.".into()),
                    similarity: SimilarityTier::ExactMatch,
                },
                SimilarityResult {
                    name: "svel-te".into(),
                    description: Some("spe-ed".into()),
                    similarity: SimilarityTier::VerySimilar,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_find_similar_excludes_unrelated() {
        let registry = MockRegistry::returning(&["absolute-nonsense"]);
        let results = find_similar(&registry, "esbuild", &SimilarityOptions::default()).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_find_similar_search_failure_is_empty() {
        let registry = MockRegistry::failing();
        let results = find_similar(&registry, "test-package", &SimilarityOptions::default()).await;
        assert!(results.is_empty());
        assert_eq!(registry.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_similar_duplicate_upstream_names() {
        let registry = MockRegistry::returning(&["svelte", "svelte"]);
        let results = find_similar(&registry, "svelte", &SimilarityOptions::default()).await;
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_find_similar_passes_options() {
        let registry = MockRegistry::returning(&["sebuild"]);
        let options = SimilarityOptions {
            max_edit_distance: 1,
            search_limit: 5,
        };

        let results = find_similar(&registry, "esbuild", &options).await;

        assert!(results.is_empty());
        assert_eq!(
            *registry.calls.lock().unwrap(),
            vec![("esbuild".to_string(), 5)]
        );
    }

    #[tokio::test]
    async fn test_find_similar_through_trait_object() {
        let registry: Box<dyn Registry> = Box::new(MockRegistry::returning(&["my-pkg"]));
        let results = find_similar(registry.as_ref(), "my_pkg", &SimilarityOptions::default()).await;
        assert_eq!(tiers(&results), vec![("my-pkg", SimilarityTier::VerySimilar)]);
    }

    #[test]
    fn test_options_defaults() {
        let options: SimilarityOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, SimilarityOptions::default());
        assert_eq!(options.max_edit_distance, 2);
        assert_eq!(options.search_limit, 20);
    }
}
