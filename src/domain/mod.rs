//! Domain logic - pure versioning rules independent of git and the hosting provider

pub mod tag;
pub mod version;

pub use tag::TagScheme;
pub use version::{trim_trailing_zeros, CoercedVersion, VersionBump, RELEASE_TYPES};
