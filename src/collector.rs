//! Tag collection: synchronize remote tags and list a target's version tags.

use crate::boundary::BoundaryWarning;
use crate::domain::TagScheme;
use crate::git::TagRepository;

/// Tags collected for a target, plus the non-fatal problems met on the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedTags {
    pub tags: Vec<String>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Collect the version tags of `target`.
///
/// Fetches all tags from `remote`, lists `<target><prefix>*` and keeps only
/// tags ending in digits and periods after the prefix. Fetch and listing
/// failures are recorded as warnings; a failed listing yields no tags.
pub fn collect_version_tags<R: TagRepository + ?Sized>(
    repo: &R,
    remote: &str,
    target: &str,
    scheme: &TagScheme,
) -> CollectedTags {
    let mut collected = CollectedTags::default();

    if let Err(e) = repo.fetch_tags(remote) {
        tracing::debug!(remote, error = %e, "tag fetch failed");
        collected.warnings.push(BoundaryWarning::FetchFailed {
            remote: remote.to_string(),
            reason: e.to_string(),
        });
    }

    let pattern = scheme.glob(target);
    let listed = match repo.list_tags(&pattern) {
        Ok(listed) => listed,
        Err(e) => {
            tracing::debug!(%pattern, error = %e, "tag listing failed");
            collected.warnings.push(BoundaryWarning::TagListingFailed {
                pattern,
                reason: e.to_string(),
            });
            return collected;
        }
    };

    let matcher = match scheme.version_tag_matcher() {
        Ok(matcher) => matcher,
        Err(e) => {
            collected.warnings.push(BoundaryWarning::TagListingFailed {
                pattern,
                reason: e.to_string(),
            });
            return collected;
        }
    };

    collected.tags = listed
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| matcher.is_match(tag))
        .collect();

    tracing::debug!(tags = ?collected.tags, "tags found");
    collected
}
