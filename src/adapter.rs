//! Adapter from content API posts to documents.
//!
//! The content API is best-effort: any failure to reach it, any non-success
//! status and any malformed body mean "not found here", never an error of
//! the resolution as a whole.

use std::collections::HashSet;

use crate::backend::{BackendPost, ContentBackend};
use crate::date::{display_date, parse_timestamp};
use crate::synth::{page_id, GraphSynthesizer};
use crate::types::{Document, GraphError};

/// Document kind used when the post carries none.
pub const DEFAULT_POST_TYPE: &str = "Post";

/// Status used when the post carries none.
pub const DEFAULT_POST_STATUS: &str = "Published";

/// Looks posts up in the content API and converts them into documents.
pub struct ExternalContentAdapter<'a, B: ContentBackend> {
    backend: &'a B,
}

impl<'a, B: ContentBackend> ExternalContentAdapter<'a, B> {
    /// Create an adapter over a backend.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Fetch `slug` and convert it, rendering dates for `lang`.
    ///
    /// Backend failures are logged and reported as `Ok(None)`. Only a graph
    /// that fails its own invariants is an error.
    pub async fn fetch_from_backend(&self, slug: &str, lang: &str) -> Result<Option<Document>, GraphError> {
        let post = match self.backend.fetch_post(slug).await {
            Ok(Some(post)) => post,
            Ok(None) => {
                tracing::debug!(slug = slug, "content API has no post for slug");
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!(slug = slug, error = %e, "content API lookup failed, treating as not found");
                return Ok(None);
            }
        };

        let doc = to_document(post, lang)?;
        tracing::debug!(id = %doc.id, nodes = doc.block_graph.len(), "adapted content API post");
        Ok(Some(doc))
    }
}

/// Map a post record onto the uniform document shape.
pub fn to_document(post: BackendPost, lang: &str) -> Result<Document, GraphError> {
    let root = page_id(post.id);
    let block_graph = GraphSynthesizer::synthesize(
        root.clone(),
        post.title.as_deref().unwrap_or_default(),
        post.content.as_deref(),
    )?;

    let created = post.created_at.as_deref().and_then(parse_timestamp);
    let display = display_date(post.created_at.as_deref(), lang);

    let date = match post.date {
        Some(value) if !value.is_null() => Some(value),
        _ => post.created_at.as_deref().map(|raw| {
            let day = raw.split('T').next().unwrap_or(raw);
            serde_json::json!({ "start_date": day })
        }),
    };

    Ok(Document {
        id: root.as_str().to_string(),
        title: post.title.unwrap_or_default(),
        slug: post.slug.unwrap_or_default(),
        summary: post.summary,
        tags: dedup_tags(post.tags.unwrap_or_default()),
        document_type: post.post_type.unwrap_or_else(|| DEFAULT_POST_TYPE.to_string()),
        status: post.status.unwrap_or_else(|| DEFAULT_POST_STATUS.to_string()),
        created_time: created,
        last_edited_time: created,
        publish_date: created.map(|at| at.timestamp_millis()),
        publish_day: display.clone(),
        last_edited_day: display,
        date,
        content: post.content,
        toc: Vec::new(),
        block_graph,
    })
}

fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter().filter(|t| seen.insert(t.clone())).collect()
}
