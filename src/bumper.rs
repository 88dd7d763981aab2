//! Next-version derivation from the resolved current version.

use semver::Version;

use crate::domain::{trim_trailing_zeros, TagScheme, VersionBump};
use crate::resolver::ResolvedVersion;

/// The version and tag that follow a resolved version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextVersion {
    pub bump: VersionBump,
    pub version: Version,
    /// Version text with trailing `.0` groups stripped
    pub version_text: String,
    pub tag: String,
}

/// Derive the next version of `target`.
///
/// The bump type follows the number of periods in the resolved tag's version
/// text; the incremented version is formatted and trimmed before building
/// the new tag.
pub fn next_version(target: &str, current: &ResolvedVersion, scheme: &TagScheme) -> NextVersion {
    let bump = current.version.bump_type();
    tracing::debug!(%bump, tag = %current.tag, "bump type");

    let version = bump.apply(&current.version.version);
    let formatted = version.to_string();
    let version_text = trim_trailing_zeros(&formatted).to_string();
    let tag = scheme.format(target, &version_text);

    NextVersion {
        bump,
        version,
        version_text,
        tag,
    }
}
