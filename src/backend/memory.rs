//! In-memory content backend for testing.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{BackendPost, ContentBackend};

/// Error type for the in-memory backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StaticBackendError {
    /// Injected transport failure.
    #[error("Content API unreachable: {0}")]
    Unreachable(String),
}

/// Content backend serving posts from a map keyed by slug.
#[derive(Debug, Default)]
pub struct StaticContentBackend {
    posts: BTreeMap<String, BackendPost>,
    failure: Option<String>,
    /// Slugs requested so far, in call order.
    requests: Mutex<Vec<String>>,
}

impl StaticContentBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `post` under its own slug.
    pub fn add(&mut self, post: BackendPost) {
        self.posts.insert(post.slug.clone().unwrap_or_default(), post);
    }

    /// Make every request fail at the transport level.
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    /// Slugs requested so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ContentBackend for StaticContentBackend {
    type Error = StaticBackendError;

    async fn fetch_post(&self, slug: &str) -> Result<Option<BackendPost>, Self::Error> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(slug.to_string());
        }
        if let Some(message) = &self.failure {
            return Err(StaticBackendError::Unreachable(message.clone()));
        }
        Ok(self.posts.get(slug).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, slug: &str) -> BackendPost {
        serde_json::from_value(serde_json::json!({ "id": id, "slug": slug })).unwrap()
    }

    #[tokio::test]
    async fn test_serves_by_slug_and_records_requests() {
        let mut backend = StaticContentBackend::new();
        backend.add(post(1, "a"));

        assert_eq!(backend.fetch_post("a").await.unwrap().unwrap().id, 1);
        assert!(backend.fetch_post("b").await.unwrap().is_none());
        assert_eq!(backend.requests(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let mut backend = StaticContentBackend::new();
        backend.fail_with("refused");
        assert!(backend.fetch_post("a").await.is_err());
        assert_eq!(backend.requests().len(), 1);
    }
}
