//! Platform-specific package detection.
//!
//! Native tools ship one npm package per OS/CPU pair (`esbuild-linux-x64`,
//! `@swc/core-win32-x64-msvc`). Listings hide or group these under their base
//! package. A name qualifies when an OS token is immediately followed by an
//! architecture token, optionally followed by an ABI token.
//!
//! OS and arch words are common in ordinary names ("linux-tips",
//! "arm-controller"), so matching is conservative: a single trailing token
//! after the pair must be a known ABI, otherwise the name is rejected.

use crate::normalize::strip_scope;

/// Operating system tokens. Sorted for `binary_search`.
pub const OS_TOKENS: &[&str] = &[
    "aix", "android", "darwin", "freebsd", "linux", "netbsd", "openbsd", "sunos", "win32",
];

/// CPU architecture tokens. Sorted for `binary_search`.
pub const ARCH_TOKENS: &[&str] = &[
    "arm", "arm64", "ia32", "loong64", "mips", "mips64el", "mipsel", "ppc", "ppc64", "ppc64le",
    "riscv64", "s390", "s390x", "x64",
];

/// libc / toolchain suffix tokens. Sorted for `binary_search`.
pub const ABI_TOKENS: &[&str] = &[
    "androideabi",
    "eabi",
    "eabihf",
    "gnu",
    "gnueabi",
    "gnueabihf",
    "gnux32",
    "msvc",
    "musl",
    "musleabi",
    "musleabihf",
];

#[inline]
fn is_os(token: &str) -> bool {
    OS_TOKENS.binary_search(&token).is_ok()
}

#[inline]
fn is_arch(token: &str) -> bool {
    ARCH_TOKENS.binary_search(&token).is_ok()
}

#[inline]
fn is_abi(token: &str) -> bool {
    ABI_TOKENS.binary_search(&token).is_ok()
}

/// The platform a package name targets.
///
/// `base` is the unscoped part of the name in front of the OS token, without
/// the joining hyphen. It is empty for names like `@esbuild/linux-x64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformTarget<'a> {
    pub base: &'a str,
    pub os: &'a str,
    pub arch: &'a str,
    pub abi: Option<&'a str>,
}

/// Extracts the OS/arch/ABI a package name is built for.
///
/// Returns `None` for names that are not platform-specific.
///
/// # Examples
///
/// ```
/// use pkgid_core::platform::{PlatformTarget, platform_target};
///
/// assert_eq!(
///     platform_target("@swc/core-linux-x64-gnu"),
///     Some(PlatformTarget { base: "core", os: "linux", arch: "x64", abi: Some("gnu") })
/// );
/// assert_eq!(platform_target("linux-tips"), None);
/// ```
pub fn platform_target(name: &str) -> Option<PlatformTarget<'_>> {
    let rest = strip_scope(name);
    if rest.is_empty() {
        return None;
    }

    let parts: Vec<&str> = rest.split('-').collect();
    if parts.len() < 2 {
        return None;
    }

    let os_idx = parts
        .windows(2)
        .position(|pair| is_os(pair[0]) && is_arch(pair[1]))?;

    // One unknown trailing token means the OS/arch pair was probably
    // coincidental; two or more are descriptive suffixes.
    let abi = match &parts[os_idx + 2..] {
        [] => None,
        [single] if is_abi(single) => Some(*single),
        [_] => return None,
        [first, ..] => Some(*first).filter(|token| is_abi(token)),
    };

    let base_len = parts[..os_idx]
        .iter()
        .map(|part| part.len() + 1)
        .sum::<usize>()
        .saturating_sub(1);

    Some(PlatformTarget {
        base: &rest[..base_len],
        os: parts[os_idx],
        arch: parts[os_idx + 1],
        abi,
    })
}

/// Returns `true` if `name` is an OS/architecture-specific build artifact.
///
/// # Examples
///
/// ```
/// use pkgid_core::is_platform_specific;
///
/// assert!(is_platform_specific("esbuild-darwin-arm64"));
/// assert!(is_platform_specific("@swc/core-linux-arm64-musl"));
/// assert!(!is_platform_specific("my-linux-x64-bindings"));
/// assert!(!is_platform_specific("@types/node"));
/// ```
pub fn is_platform_specific(name: &str) -> bool {
    platform_target(name).is_some()
}
