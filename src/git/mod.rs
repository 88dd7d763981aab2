//! Tag source abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations the
//! tag collector needs, allowing for multiple implementations including real
//! git repositories and mock implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [TagRepository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2TagRepository]: A real implementation using the `git2` crate
//! - [repository::UnavailableRepository]: Stands in when no repository could be opened
//! - [mock::MockTagRepository]: A mock implementation for testing
//!
//! # Usage
//!
//! The collector depends on the [TagRepository] trait rather than concrete
//! implementations so version resolution can be exercised without a repository.
//!
//! ```rust
//! # use affirm::git::TagRepository;
//! # fn example<R: TagRepository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! repo.fetch_tags("origin")?;
//! let tags = repo.list_tags("svc-v*")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockTagRepository;
pub use repository::{Git2TagRepository, UnavailableRepository};

use crate::error::Result;

/// Git operations needed to discover existing version tags
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync` to allow safe sharing across threads.
///
/// ## Error Handling
///
/// Implementations map underlying errors (like `git2::Error`) to the
/// appropriate [crate::error::AffirmError] variants. Callers in the collector
/// treat every error as "no tags found".
pub trait TagRepository: Send + Sync {
    /// Synchronize all tags from a remote
    ///
    /// Fetches `+refs/tags/*:refs/tags/*` so the local tag set reflects the
    /// remote before listing.
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    ///
    /// # Returns
    /// * `Ok(())` - Tags are up to date
    /// * `Err` - If the remote doesn't exist or the fetch fails
    fn fetch_tags(&self, remote: &str) -> Result<()>;

    /// List tag names matching a glob
    ///
    /// # Arguments
    /// * `pattern` - fnmatch-style glob (e.g., "svc-v*")
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Matching tag names
    /// * `Err` - If there's a git error
    ///
    /// # Example
    /// ```rust
    /// # use affirm::git::TagRepository;
    /// # fn example<R: TagRepository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
    /// for tag in repo.list_tags("svc-v*")? {
    ///     println!("Tag: {}", tag);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn list_tags(&self, pattern: &str) -> Result<Vec<String>>;
}
