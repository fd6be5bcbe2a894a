//! Package name normalization.
//!
//! Reduces a package name to the key used for identity comparison, so that
//! `@scope/My_Package.js`, `my-package` and `mypackage` all compare equal.

/// Characters removed from names before comparison.
const SEPARATORS: [char; 3] = ['-', '_', '.'];

/// Tokens that carry no identity ("foo-js", "node-foo" are still "foo").
///
/// At most one affix is removed per name, prefixes before suffixes.
pub const NOISE_AFFIXES: &[&str] = &["js", "node"];

/// Returns the part of `name` after the last `/`.
///
/// Drops an npm `@scope/` prefix; unscoped names are returned unchanged.
///
/// # Examples
///
/// ```
/// use pkgid_core::normalize::strip_scope;
///
/// assert_eq!(strip_scope("@swc/core"), "core");
/// assert_eq!(strip_scope("lodash"), "lodash");
/// assert_eq!(strip_scope("@scope/"), "");
/// ```
pub fn strip_scope(name: &str) -> &str {
    match name.rfind('/') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// Normalizes a package name into its canonical comparison key.
///
/// Steps: strip the scope, lowercase, delete every `-`, `_` and `.`, then
/// remove one leading or trailing noise affix (`js`, `node`) unless that
/// would leave nothing behind.
///
/// Total over all inputs; the empty string normalizes to itself.
///
/// # Examples
///
/// ```
/// use pkgid_core::normalize;
///
/// assert_eq!(normalize("@scope/My_Package"), "mypackage");
/// assert_eq!(normalize("ESBuild"), "esbuild");
/// assert_eq!(normalize("foo-js"), "foo");
/// assert_eq!(normalize("js"), "js");
/// ```
pub fn normalize(name: &str) -> String {
    let key: String = strip_scope(name)
        .to_lowercase()
        .chars()
        .filter(|c| !SEPARATORS.contains(c))
        .collect();

    let stripped = NOISE_AFFIXES
        .iter()
        .find_map(|affix| key.strip_prefix(affix).filter(|rest| !rest.is_empty()))
        .or_else(|| {
            NOISE_AFFIXES
                .iter()
                .find_map(|affix| key.strip_suffix(affix).filter(|rest| !rest.is_empty()))
        })
        .map(str::to_string);

    stripped.unwrap_or(key)
}
