//! Slug resolution.
//!
//! The resolver tries four stages strictly in order, each only after the
//! previous one definitively misses:
//!
//! ```text
//! CandidateGenerator → CatalogMatcher → DirectFetcher → ExternalContentAdapter → None
//!                                                              ↓
//!                                                      GraphSynthesizer
//! ```
//!
//! Native documents with a non-trivial graph then pass through the
//! [`PostProcessor`]. Nothing is cached between calls.
//!
//! ## Failure asymmetry
//!
//! Document store failures (catalog load, direct lookup) abort the request
//! with [`ResolveError::Store`]. Content API failures are logged and treated
//! as "not found".

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::adapter::ExternalContentAdapter;
use crate::backend::ContentBackend;
use crate::candidates::CandidateGenerator;
use crate::config::ResolverConfig;
use crate::fetcher::DirectFetcher;
use crate::matcher::CatalogMatcher;
use crate::post_process::{PostProcessError, PostProcessor};
use crate::store::DocumentStore;
use crate::types::{Document, DocumentOrigin, GraphError, ResolvedDocument, RoutePath};

/// Error type for resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The document store failed.
    #[error("Store error: {0}")]
    Store(String),
    /// Post-processing a native document failed.
    #[error("Post-processing error: {0}")]
    PostProcess(#[from] PostProcessError),
    /// A synthesized graph violated its invariants (internal consistency violation).
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

impl ResolveError {
    /// Create a store error from any error type.
    pub fn from_store<E: std::error::Error>(e: E) -> Self {
        Self::Store(e.to_string())
    }
}

/// Stage at which a resolution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStage {
    /// Matched in the preloaded catalog.
    Catalog,
    /// Found by direct identifier lookup.
    DirectFetch,
    /// Built from a content API post.
    ContentApi,
    /// Nothing found.
    NotFound,
}

impl std::fmt::Display for ResolutionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog => write!(f, "catalog"),
            Self::DirectFetch => write!(f, "direct_fetch"),
            Self::ContentApi => write!(f, "content_api"),
            Self::NotFound => write!(f, "not_found"),
        }
    }
}

/// Outcome of one resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The document, if any stage found one.
    pub document: Option<ResolvedDocument>,
    /// Stage that produced the outcome.
    pub stage: ResolutionStage,
}

/// Data handed to the page renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageProps {
    /// Resolved document; `null` renders the not-found page.
    pub post: Option<ResolvedDocument>,
    /// Revalidation interval in seconds, `null` under static export.
    pub revalidate: Option<u64>,
}

/// Resolves route paths to documents.
pub struct SlugResolver<S, B, P>
where
    S: DocumentStore,
    B: ContentBackend,
    P: PostProcessor,
{
    store: Arc<S>,
    backend: Arc<B>,
    post_processor: Arc<P>,
    config: ResolverConfig,
}

impl<S, B, P> SlugResolver<S, B, P>
where
    S: DocumentStore + 'static,
    B: ContentBackend + 'static,
    P: PostProcessor + 'static,
{
    /// Create a resolver.
    pub fn new(store: Arc<S>, backend: Arc<B>, post_processor: Arc<P>, config: ResolverConfig) -> Self {
        Self {
            store,
            backend,
            post_processor,
            config,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The document store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Load the catalog and resolve `path`.
    pub async fn resolve(&self, path: &RoutePath, locale: Option<&str>) -> Result<Resolution, ResolveError> {
        let catalog = self.store.list_catalog().await.map_err(ResolveError::from_store)?;
        self.resolve_with_catalog(path, locale, catalog).await
    }

    /// Resolve `path` against an already loaded catalog.
    pub async fn resolve_with_catalog(
        &self,
        path: &RoutePath,
        locale: Option<&str>,
        mut catalog: Vec<Document>,
    ) -> Result<Resolution, ResolveError> {
        let start = Instant::now();
        let lang = self.config.effective_lang(path, locale);

        // 1. Catalog
        let candidates = CandidateGenerator::new(&self.config).generate(path);
        let mut resolution = match CatalogMatcher::position(&catalog, &candidates) {
            Some(pos) => Resolution {
                document: Some(ResolvedDocument::Native(catalog.swap_remove(pos))),
                stage: ResolutionStage::Catalog,
            },
            None => self.resolve_uncatalogued(path, &lang).await?,
        };

        if let Some(ResolvedDocument::Native(doc)) = resolution.document.as_mut() {
            if !doc.block_graph.is_trivial() {
                self.post_processor.process(doc).await?;
            }
        }

        record_resolution_metrics(path, resolution.stage, start.elapsed().as_millis() as u64);
        Ok(resolution)
    }

    /// Stages 2-4: direct lookup, content API, not found.
    async fn resolve_uncatalogued(&self, path: &RoutePath, lang: &str) -> Result<Resolution, ResolveError> {
        // 2. Direct store lookup
        let tail = path.last_segment();
        let fetched = DirectFetcher::new(self.store.as_ref())
            .fetch_by_id(tail)
            .await
            .map_err(ResolveError::from_store)?;
        if let Some(doc) = fetched {
            return Ok(Resolution {
                document: Some(ResolvedDocument::Native(doc)),
                stage: ResolutionStage::DirectFetch,
            });
        }

        // 3. Content API
        let slug = match path.trailing_joined() {
            joined if joined.is_empty() => path.last_segment().to_string(),
            joined => joined,
        };
        let adapted = ExternalContentAdapter::new(self.backend.as_ref())
            .fetch_from_backend(&slug, lang)
            .await?;
        if let Some(doc) = adapted {
            return Ok(Resolution {
                document: Some(ResolvedDocument::Synthesized(doc)),
                stage: ResolutionStage::ContentApi,
            });
        }

        // 4. Not found
        Ok(Resolution {
            document: None,
            stage: ResolutionStage::NotFound,
        })
    }

    /// Resolve and wrap the result for the renderer.
    pub async fn page_props(&self, path: &RoutePath, locale: Option<&str>) -> Result<PageProps, ResolveError> {
        let resolution = self.resolve(path, locale).await?;
        Ok(PageProps {
            post: resolution.document,
            revalidate: self.config.revalidate(),
        })
    }

    /// Route paths to pre-render, from the current catalog.
    pub async fn static_paths(&self) -> Result<Vec<RoutePath>, ResolveError> {
        let catalog = self.store.list_catalog().await.map_err(ResolveError::from_store)?;
        Ok(static_paths(&catalog))
    }
}

/// Split catalog slugs into route paths.
///
/// Navigational entries and slugs without a `/` are skipped: single-segment
/// slugs are served by a different route.
pub fn static_paths(catalog: &[Document]) -> Vec<RoutePath> {
    catalog
        .iter()
        .filter(|doc| !doc.is_navigation() && doc.slug.contains('/'))
        .filter_map(|doc| RoutePath::parse(&doc.slug).ok())
        .collect()
}

/// Log a resolution metric line.
pub fn record_resolution_metrics(path: &RoutePath, stage: ResolutionStage, latency_ms: u64) {
    tracing::info!(
        target: "slug_resolver::metrics",
        metric_type = "resolution",
        path = %path,
        stage = %stage,
        latency_ms = latency_ms,
        "resolution_metric"
    );
}

impl Resolution {
    /// Origin of the resolved document.
    pub fn origin(&self) -> Option<DocumentOrigin> {
        self.document.as_ref().map(ResolvedDocument::origin)
    }
}
