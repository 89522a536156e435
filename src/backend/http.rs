//! HTTP client for the content API.

use std::time::Duration;

use async_trait::async_trait;

use super::{BackendPost, ContentBackend};

/// Transport or decoding failure talking to the content API.
#[derive(Debug, thiserror::Error)]
pub enum HttpBackendError {
    /// Request could not be sent or the body could not be read.
    #[error("Content API request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Body was not a post record.
    #[error("Content API returned a malformed body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Content backend speaking HTTP.
///
/// No request timeout is applied unless one is configured with
/// [`with_timeout`](Self::with_timeout).
#[derive(Debug, Clone)]
pub struct HttpContentBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContentBackend {
    /// Create a backend for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a backend whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, HttpBackendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the post lookup for `slug`.
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/api/post/slug/{}", self.base_url, slug)
    }
}

#[async_trait]
impl ContentBackend for HttpContentBackend {
    type Error = HttpBackendError;

    async fn fetch_post(&self, slug: &str) -> Result<Option<BackendPost>, Self::Error> {
        let url = self.post_url(slug);
        tracing::debug!(url = %url, "fetching post from content API");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "content API returned non-success status");
            return Ok(None);
        }

        let body = response.bytes().await?;
        let post: BackendPost = serde_json::from_slice(&body)?;
        tracing::debug!(id = post.id, slug = ?post.slug, "content API post fetched");
        Ok(Some(post))
    }
}
