//! Tag publishing through a hosting provider
//!
//! - [github::GitHubPublisher]: creates refs through the GitHub REST API
//! - [mock::RecordingPublisher]: records requests for tests

pub mod github;
pub mod mock;

pub use github::GitHubPublisher;
pub use mock::RecordingPublisher;

use crate::error::Result;

/// Creates tag references on the hosting provider
pub trait TagPublisher: Send + Sync {
    /// Create a lightweight tag `refs/tags/<tag>` pointing at `sha`
    ///
    /// No retry is attempted; any failure is returned to the caller as is.
    fn create_tag_ref(&self, tag: &str, sha: &str) -> Result<()>;
}
