//! Package identity engine for pkgid.
//!
//! This crate decides when two package names refer to the same thing and
//! when a name is just a per-platform build of another package.
//!
//! # Architecture
//!
//! pkgid-core defines:
//! - **Normalizer**: [`normalize`] reduces a name to its comparison key
//! - **Platform classifier**: [`is_platform_specific`] spots
//!   `<name>-<os>-<arch>[-<abi>]` native binary packages
//! - **Similarity ranking**: [`score_similarity`] grades one candidate,
//!   [`find_similar`] searches a [`Registry`] and ranks the results
//! - **Registry seam**: the [`Registry`] trait and a small [`HttpClient`]
//!   used by concrete registry implementations
//!
//! # Examples
//!
//! ```
//! use pkgid_core::{SimilarityTier, is_platform_specific, normalize, score_similarity};
//!
//! assert_eq!(normalize("@scope/My_Package"), "mypackage");
//! assert!(is_platform_specific("@rollup/rollup-linux-x64-gnu"));
//! assert_eq!(score_similarity("esbuild", "es-build"), Some(SimilarityTier::VerySimilar));
//! ```

pub mod error;
pub mod http;
pub mod normalize;
pub mod platform;
pub mod registry;
pub mod similarity;

// Re-export commonly used types
pub use error::{PkgIdError, Result};
pub use http::HttpClient;
pub use normalize::normalize;
pub use platform::{PlatformTarget, is_platform_specific, platform_target};
pub use registry::{Registry, SearchCandidate};
pub use similarity::{
    DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_SEARCH_LIMIT, SimilarityOptions, SimilarityResult,
    SimilarityScorer, SimilarityTier, find_similar, rank_candidates, score_similarity,
};
