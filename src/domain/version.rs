use once_cell::sync::Lazy;
use regex::Regex;
use semver::Version;
use std::fmt;

/// Largest component value accepted as a strictly valid version (2^53 - 1).
pub const MAX_SAFE_COMPONENT: u64 = 9_007_199_254_740_991;

/// First run of up to three dot-separated digit groups not embedded in a longer digit run.
const COERCE_PATTERN: &str = r"(?:^|[^\d])(\d{1,16})(?:\.(\d{1,16}))?(?:\.(\d{1,16}))?(?:$|[^\d])";

static COERCE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(COERCE_PATTERN).expect("coerce pattern is a valid regex"));

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

/// Release types ordered from the least to the most specific version shape.
pub const RELEASE_TYPES: [VersionBump; 3] =
    [VersionBump::Major, VersionBump::Minor, VersionBump::Patch];

impl VersionBump {
    /// Select the bump type from how many dot-separated groups a version text has.
    ///
    /// One group bumps major, two bump minor, three bump patch. Longer
    /// shapes are clamped to patch.
    pub fn from_component_count(components: usize) -> Self {
        let index = components
            .saturating_sub(1)
            .min(RELEASE_TYPES.len() - 1);
        RELEASE_TYPES[index]
    }

    /// Apply this bump to a version, clearing lower components and any
    /// pre-release or build metadata.
    pub fn apply(&self, version: &Version) -> Version {
        match self {
            VersionBump::Major => Version::new(version.major + 1, 0, 0),
            VersionBump::Minor => Version::new(version.major, version.minor + 1, 0),
            VersionBump::Patch => Version::new(version.major, version.minor, version.patch + 1),
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        };
        f.write_str(name)
    }
}

/// A leniently parsed version together with the shape of its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercedVersion {
    pub version: Version,
    /// Dot-separated groups in the source text (periods plus one), empty groups included
    pub components: usize,
}

impl CoercedVersion {
    /// Coerce free-form text into a three-component version.
    ///
    /// Missing minor and patch components are filled with zero, so `"2"`
    /// becomes `2.0.0` and `"2.3"` becomes `2.3.0`. Returns `None` when the
    /// text holds no extractable numeric version.
    ///
    /// The shape counts every period in `text`, so `"1.2."` has three groups
    /// even though only two numbers were extracted.
    pub fn coerce(text: &str) -> Option<Self> {
        let captures = COERCE_REGEX.captures(text)?;

        let mut parts = [0u64; 3];
        for (slot, part) in parts.iter_mut().enumerate() {
            match captures.get(slot + 1) {
                Some(m) => *part = m.as_str().parse().ok()?,
                None => break,
            }
        }

        Some(CoercedVersion {
            version: Version::new(parts[0], parts[1], parts[2]),
            components: text.matches('.').count() + 1,
        })
    }

    /// Whether every component stays within the safe integer range.
    pub fn is_valid(&self) -> bool {
        [self.version.major, self.version.minor, self.version.patch]
            .iter()
            .all(|component| *component <= MAX_SAFE_COMPONENT)
    }

    /// Bump type implied by the shape of this version.
    pub fn bump_type(&self) -> VersionBump {
        VersionBump::from_component_count(self.components)
    }
}

impl fmt::Display for CoercedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

/// Strip trailing `.0` groups from formatted version text.
///
/// Operates on text only: `2.0.0` becomes `2` and `2.3.0` becomes `2.3`.
pub fn trim_trailing_zeros(text: &str) -> &str {
    let mut trimmed = text;
    while let Some(rest) = trimmed.strip_suffix(".0") {
        trimmed = rest;
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_full_version() {
        let v = CoercedVersion::coerce("1.2.3").unwrap();
        assert_eq!(v.version, Version::new(1, 2, 3));
        assert_eq!(v.components, 3);
    }

    #[test]
    fn test_coerce_completes_partial_versions() {
        let major_only = CoercedVersion::coerce("2").unwrap();
        assert_eq!(major_only.version, Version::new(2, 0, 0));
        assert_eq!(major_only.components, 1);

        let major_minor = CoercedVersion::coerce("2.3").unwrap();
        assert_eq!(major_minor.version, Version::new(2, 3, 0));
        assert_eq!(major_minor.components, 2);
    }

    #[test]
    fn test_coerce_ignores_extra_components() {
        let v = CoercedVersion::coerce("1.2.3.4").unwrap();
        assert_eq!(v.version, Version::new(1, 2, 3));
        assert_eq!(v.components, 4);
        assert_eq!(v.bump_type(), VersionBump::Patch);
    }

    #[test]
    fn test_shape_counts_stray_periods() {
        let trailing = CoercedVersion::coerce("1.2.").unwrap();
        assert_eq!(trailing.version, Version::new(1, 2, 0));
        assert_eq!(trailing.bump_type(), VersionBump::Patch);

        let doubled = CoercedVersion::coerce("1..2").unwrap();
        assert_eq!(doubled.version, Version::new(1, 0, 0));
        assert_eq!(doubled.bump_type(), VersionBump::Patch);

        let leading = CoercedVersion::coerce(".5").unwrap();
        assert_eq!(leading.version, Version::new(5, 0, 0));
        assert_eq!(leading.bump_type(), VersionBump::Minor);
    }

    #[test]
    fn test_coerce_pattern_compiles() {
        assert!(Regex::new(COERCE_PATTERN).is_ok());
    }

    #[test]
    fn test_coerce_finds_embedded_version() {
        let v = CoercedVersion::coerce("foo-v4.5").unwrap();
        assert_eq!(v.version, Version::new(4, 5, 0));
    }

    #[test]
    fn test_coerce_rejects_non_numeric() {
        assert!(CoercedVersion::coerce("").is_none());
        assert!(CoercedVersion::coerce("...").is_none());
        assert!(CoercedVersion::coerce("abc").is_none());
    }

    #[test]
    fn test_coerce_rejects_overlong_digit_runs() {
        assert!(CoercedVersion::coerce("12345678901234567").is_none());
    }

    #[test]
    fn test_validity_bound() {
        let safe = CoercedVersion::coerce("9007199254740991").unwrap();
        assert!(safe.is_valid());

        let unsafe_version = CoercedVersion::coerce("9007199254740992").unwrap();
        assert!(!unsafe_version.is_valid());
    }

    #[test]
    fn test_bump_type_from_component_count() {
        assert_eq!(VersionBump::from_component_count(1), VersionBump::Major);
        assert_eq!(VersionBump::from_component_count(2), VersionBump::Minor);
        assert_eq!(VersionBump::from_component_count(3), VersionBump::Patch);
        assert_eq!(VersionBump::from_component_count(7), VersionBump::Patch);
        assert_eq!(VersionBump::from_component_count(0), VersionBump::Major);
    }

    #[test]
    fn test_bump_type_ignores_component_values() {
        let small = CoercedVersion::coerce("0.0").unwrap();
        let large = CoercedVersion::coerce("99.42").unwrap();
        assert_eq!(small.bump_type(), large.bump_type());
    }

    #[test]
    fn test_version_bump_apply() {
        let v = Version::new(1, 2, 3);
        assert_eq!(VersionBump::Major.apply(&v), Version::new(2, 0, 0));
        assert_eq!(VersionBump::Minor.apply(&v), Version::new(1, 3, 0));
        assert_eq!(VersionBump::Patch.apply(&v), Version::new(1, 2, 4));
    }

    #[test]
    fn test_version_bump_apply_clears_prerelease() {
        let v = Version::parse("1.2.3-rc.1+build.5").unwrap();
        assert_eq!(VersionBump::Patch.apply(&v).to_string(), "1.2.4");
    }

    #[test]
    fn test_version_bump_display() {
        assert_eq!(VersionBump::Major.to_string(), "major");
        assert_eq!(VersionBump::Minor.to_string(), "minor");
        assert_eq!(VersionBump::Patch.to_string(), "patch");
    }

    #[test]
    fn test_trim_trailing_zeros() {
        assert_eq!(trim_trailing_zeros("3.0.0"), "3");
        assert_eq!(trim_trailing_zeros("2.3.0"), "2.3");
        assert_eq!(trim_trailing_zeros("1.3.1"), "1.3.1");
        assert_eq!(trim_trailing_zeros("1.10.0"), "1.10");
        assert_eq!(trim_trailing_zeros("10.0.0"), "10");
    }

    #[test]
    fn test_trim_trailing_zeros_is_idempotent() {
        for text in ["3.0.0", "2.3.0", "0.0.1", "10.20.0", "0.0.0"] {
            let once = trim_trailing_zeros(text);
            assert_eq!(trim_trailing_zeros(once), once);
        }
    }
}
