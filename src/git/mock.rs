use crate::error::{AffirmError, Result};
use crate::git::TagRepository;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock tag source for testing without actual git operations
pub struct MockTagRepository {
    tags: Vec<String>,
    fail_fetch: bool,
    fail_list: bool,
    fetch_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl MockTagRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockTagRepository {
            tags: Vec::new(),
            fail_fetch: false,
            fail_list: false,
            fetch_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock repository holding the given tags, in order
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut repo = Self::new();
        for tag in tags {
            repo.add_tag(tag);
        }
        repo
    }

    /// Add a tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Make every fetch fail
    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    /// Make every listing fail
    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Number of fetches performed so far
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of listings performed so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockTagRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal glob: a trailing `*` matches any suffix, otherwise exact match.
fn glob_matches(pattern: &str, name: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => name.starts_with(prefix),
        None => name == pattern,
    }
}

impl TagRepository for MockTagRepository {
    fn fetch_tags(&self, remote: &str) -> Result<()> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch {
            return Err(AffirmError::remote(format!(
                "Failed to fetch tags from remote '{}'",
                remote
            )));
        }
        Ok(())
    }

    fn list_tags(&self, pattern: &str) -> Result<Vec<String>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list {
            return Err(AffirmError::tag(format!("Cannot list tags '{}'", pattern)));
        }
        Ok(self
            .tags
            .iter()
            .filter(|tag| glob_matches(pattern, tag))
            .cloned()
            .collect())
    }
}
