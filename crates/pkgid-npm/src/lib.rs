//! npm registry support for pkgid.
//!
//! Implements the [`pkgid_core::Registry`] collaborator against the npm
//! registry: package existence probes and the v1 search API.

pub mod error;
pub mod registry;
pub mod types;

pub use error::{NpmError, Result};
pub use registry::{NpmRegistry, REGISTRY_BASE, encode_package_name, package_url};
pub use types::NpmPackage;
