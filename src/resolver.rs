//! Version resolution: pick the current version of a target from its tags.

use serde::Serialize;

use crate::domain::{CoercedVersion, TagScheme};
use crate::error::Result;

/// A tag paired with its coerced version, if one could be extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCandidate {
    pub tag: String,
    pub version: Option<CoercedVersion>,
}

impl VersionCandidate {
    /// Strip `<target><prefix>` from `tag` and coerce the remainder
    pub fn from_tag(target: &str, tag: &str, scheme: &TagScheme) -> Self {
        let version = scheme
            .version_text(target, tag)
            .and_then(CoercedVersion::coerce);

        VersionCandidate {
            tag: tag.to_string(),
            version,
        }
    }

    /// Whether the candidate carries a strictly valid version
    pub fn is_valid(&self) -> bool {
        self.version.as_ref().is_some_and(CoercedVersion::is_valid)
    }
}

/// The version considered current for a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub tag: String,
    pub version: CoercedVersion,
    /// True when no tag qualified and the baseline was synthesized
    pub is_default: bool,
}

#[derive(Serialize)]
struct ResolvedVersionOutput<'a> {
    tag: &'a str,
    version: String,
}

impl ResolvedVersion {
    /// JSON form used for the `previous_version` output
    pub fn to_json(&self) -> Result<String> {
        let output = ResolvedVersionOutput {
            tag: &self.tag,
            version: self.version.to_string(),
        };
        Ok(serde_json::to_string(&output)?)
    }
}

/// Build candidates for every collected tag, preserving order
pub fn version_candidates(
    target: &str,
    tags: &[String],
    scheme: &TagScheme,
) -> Vec<VersionCandidate> {
    let candidates: Vec<VersionCandidate> = tags
        .iter()
        .map(|tag| VersionCandidate::from_tag(target, tag, scheme))
        .collect();

    let versions: Vec<Option<String>> = candidates
        .iter()
        .map(|c| c.version.as_ref().map(ToString::to_string))
        .collect();
    tracing::debug!(?versions, "all versions found");
    candidates
}

/// Select the highest valid candidate, or synthesize the baseline.
///
/// Among equal versions the candidate appearing last wins.
pub fn select_highest(
    target: &str,
    candidates: Vec<VersionCandidate>,
    scheme: &TagScheme,
) -> Result<ResolvedVersion> {
    let valid: Vec<(String, CoercedVersion)> = candidates
        .into_iter()
        .filter(VersionCandidate::is_valid)
        .filter_map(|c| c.version.map(|v| (c.tag, v)))
        .collect();

    let versions: Vec<String> = valid.iter().map(|(_, v)| v.to_string()).collect();
    tracing::debug!(?versions, "valid versions found");

    let highest = valid
        .into_iter()
        .max_by(|(_, a), (_, b)| a.version.cmp(&b.version));

    let resolved = match highest {
        Some((tag, version)) => ResolvedVersion {
            tag,
            version,
            is_default: false,
        },
        None => ResolvedVersion {
            tag: scheme.default_tag(target),
            version: scheme.parsed_default_version()?,
            is_default: true,
        },
    };

    tracing::debug!(tag = %resolved.tag, version = %resolved.version, "highest version found");
    Ok(resolved)
}

/// Resolve the current version of `target` from its collected tags
pub fn resolve_current_version(
    target: &str,
    tags: &[String],
    scheme: &TagScheme,
) -> Result<ResolvedVersion> {
    select_highest(target, version_candidates(target, tags, scheme), scheme)
}
