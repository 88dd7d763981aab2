use crate::error::{AffirmError, Result};
use crate::publish::TagPublisher;
use std::sync::Mutex;

/// A tag reference creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRef {
    pub tag: String,
    pub sha: String,
}

/// Publisher that records requests instead of calling a provider
#[derive(Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<PublishedRef>>,
    failure: Option<String>,
}

impl RecordingPublisher {
    /// Create a publisher that accepts every request
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a publisher that rejects every request with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        RecordingPublisher {
            published: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    /// Requests received so far, including rejected ones
    pub fn published(&self) -> Vec<PublishedRef> {
        self.published
            .lock()
            .map(|refs| refs.clone())
            .unwrap_or_default()
    }
}

impl TagPublisher for RecordingPublisher {
    fn create_tag_ref(&self, tag: &str, sha: &str) -> Result<()> {
        self.published
            .lock()
            .map_err(|_| AffirmError::publish("Recorder lock poisoned"))?
            .push(PublishedRef {
                tag: tag.to_string(),
                sha: sha.to_string(),
            });

        match &self.failure {
            Some(message) => Err(AffirmError::publish(message.clone())),
            None => Ok(()),
        }
    }
}
