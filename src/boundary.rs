use std::fmt;

/// Non-fatal conditions met while collecting and resolving version tags.
/// These are reported to the user but never abort the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Remote tags could not be synchronized; the local tag set is used as is
    FetchFailed { remote: String, reason: String },
    /// Listing tags failed; treated as no tags found
    TagListingFailed { pattern: String, reason: String },
    /// Tag matched the listing but holds no usable version
    UnparsableTag { tag: String },
    /// No valid version tag exists for the target; the baseline is used
    NoVersionTags { target: String, default_tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::FetchFailed { remote, reason } => {
                write!(
                    f,
                    "Could not fetch tags from remote '{}': {}. Using local tags.",
                    remote, reason
                )
            }
            BoundaryWarning::TagListingFailed { pattern, reason } => {
                write!(f, "Could not list tags matching '{}': {}", pattern, reason)
            }
            BoundaryWarning::UnparsableTag { tag } => {
                write!(f, "Cannot parse a version from tag '{}'", tag)
            }
            BoundaryWarning::NoVersionTags {
                target,
                default_tag,
            } => {
                write!(
                    f,
                    "No version tags found for '{}', starting from '{}'",
                    target, default_tag
                )
            }
        }
    }
}
