//! Service state management.
//!
//! Holds the resolver shared by all request handlers.

use std::sync::Arc;

use crate::backend::ContentBackend;
use crate::config::ResolverConfig;
use crate::post_process::PostProcessor;
use crate::resolver::SlugResolver;
use crate::store::DocumentStore;

/// Shared service state.
///
/// Requests share the resolver's configuration and backend handles only;
/// every resolution loads its own catalog.
pub struct ServiceState<S, B, P>
where
    S: DocumentStore + 'static,
    B: ContentBackend + 'static,
    P: PostProcessor + 'static,
{
    /// The resolver.
    pub resolver: Arc<SlugResolver<S, B, P>>,
}

impl<S, B, P> ServiceState<S, B, P>
where
    S: DocumentStore + 'static,
    B: ContentBackend + 'static,
    P: PostProcessor + 'static,
{
    /// Create state from its parts.
    pub fn new(store: S, backend: B, post_processor: P, config: ResolverConfig) -> Self {
        Self {
            resolver: Arc::new(SlugResolver::new(
                Arc::new(store),
                Arc::new(backend),
                Arc::new(post_processor),
                config,
            )),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ResolverConfig {
        self.resolver.config()
    }
}

impl<S, B, P> Clone for ServiceState<S, B, P>
where
    S: DocumentStore + 'static,
    B: ContentBackend + 'static,
    P: PostProcessor + 'static,
{
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
        }
    }
}
