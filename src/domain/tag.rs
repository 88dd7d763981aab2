use crate::domain::version::CoercedVersion;
use crate::error::{AffirmError, Result};
use regex::Regex;

/// Literal separating a target name from its version text.
pub const DEFAULT_VERSION_PREFIX: &str = "-v";

/// Baseline version used when a target has no valid version tag yet.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Naming scheme for version tags: `<target><version_prefix><version-text>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagScheme {
    pub version_prefix: String,
    pub default_version: String,
}

impl Default for TagScheme {
    fn default() -> Self {
        TagScheme {
            version_prefix: DEFAULT_VERSION_PREFIX.to_string(),
            default_version: DEFAULT_VERSION.to_string(),
        }
    }
}

impl TagScheme {
    /// Create a new tag scheme
    pub fn new(version_prefix: impl Into<String>, default_version: impl Into<String>) -> Self {
        TagScheme {
            version_prefix: version_prefix.into(),
            default_version: default_version.into(),
        }
    }

    /// Check that the prefix is usable and the default version can be parsed
    pub fn validate(&self) -> Result<()> {
        if self.version_prefix.is_empty() {
            return Err(AffirmError::config("version_prefix must not be empty"));
        }
        self.parsed_default_version()?;
        Ok(())
    }

    /// Tag name prefix for a target (e.g., "svc" -> "svc-v")
    pub fn tag_prefix(&self, target: &str) -> String {
        format!("{}{}", target, self.version_prefix)
    }

    /// Glob passed to the tag source when listing a target's tags
    pub fn glob(&self, target: &str) -> String {
        format!("{}*", self.tag_prefix(target))
    }

    /// Format a full tag name from a target and version text
    /// Example: target="svc", version="1.3.1" -> "svc-v1.3.1"
    pub fn format(&self, target: &str, version_text: &str) -> String {
        format!("{}{}", self.tag_prefix(target), version_text)
    }

    /// Tag synthesized when no valid version tag exists
    pub fn default_tag(&self, target: &str) -> String {
        self.format(target, &self.default_version)
    }

    /// The configured default version, coerced the same way tags are
    pub fn parsed_default_version(&self) -> Result<CoercedVersion> {
        CoercedVersion::coerce(&self.default_version)
            .filter(CoercedVersion::is_valid)
            .ok_or_else(|| {
                AffirmError::version(format!(
                    "Invalid default version: '{}'",
                    self.default_version
                ))
            })
    }

    /// Regex accepting tags whose text after the prefix is only digits and periods
    pub fn version_tag_matcher(&self) -> Result<Regex> {
        let pattern = format!(r"{}[.\d]+$", regex::escape(&self.version_prefix));
        Regex::new(&pattern).map_err(|e| AffirmError::tag(format!("Invalid tag pattern: {}", e)))
    }

    /// Version text of a tag belonging to `target`, or `None` for foreign tags
    pub fn version_text<'a>(&self, target: &str, tag: &'a str) -> Option<&'a str> {
        tag.strip_prefix(target)?
            .strip_prefix(self.version_prefix.as_str())
    }
}
