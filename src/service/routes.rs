//! Axum routes for the slug resolver service.

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use crate::backend::ContentBackend;
use crate::post_process::PostProcessor;
use crate::resolver::ResolveError;
use crate::store::DocumentStore;
use crate::types::RoutePath;

use super::state::ServiceState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query string accepted by page routes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    /// Reader locale (`en-US`, `zh-CN`, ...).
    pub locale: Option<String>,
}

/// Static path entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPathDto {
    /// First segment.
    pub prefix: String,
    /// Second segment.
    pub slug: String,
    /// Remaining segments.
    pub suffix: Vec<String>,
}

impl From<&RoutePath> for StaticPathDto {
    fn from(path: &RoutePath) -> Self {
        Self {
            prefix: path.prefix().to_string(),
            slug: path.primary().to_string(),
            suffix: path.trailing().to_vec(),
        }
    }
}

/// Static path listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPathsResponse {
    /// Paths to pre-render.
    pub paths: Vec<StaticPathDto>,
}

/// Service health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` when the process answers.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Configured locale tags.
    pub locale_tags: Vec<String>,
    /// Revalidation interval handed to renderers.
    pub revalidate: Option<u64>,
}

/// Simple liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    /// Always `alive`.
    pub status: String,
}

/// Structured error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Machine-readable error code.
    pub code: String,
    /// Additional error details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response with code and message.
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }

    /// Add details to the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<ResolveError> for ErrorResponse {
    fn from(e: ResolveError) -> Self {
        let code = match &e {
            ResolveError::Store(_) => "STORE_FAILED",
            ResolveError::PostProcess(_) => "POST_PROCESS_FAILED",
            ResolveError::Graph(_) => "GRAPH_INVALID",
        };
        Self::new(code, e.to_string())
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        tracing::error!(
            code = %self.code,
            error = %self.error,
            "Request error"
        );
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

async fn render_page<S, B, P>(
    state: &ServiceState<S, B, P>,
    segments: Result<RoutePath, crate::types::PathError>,
    locale: Option<String>,
) -> Response
where
    S: DocumentStore + 'static,
    B: ContentBackend + 'static,
    P: PostProcessor + 'static,
{
    let path = match segments {
        Ok(path) => path,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("INVALID_PATH", e.to_string())),
            )
                .into_response();
        }
    };

    match state.resolver.page_props(&path, locale.as_deref()).await {
        Ok(props) if props.post.is_some() => (StatusCode::OK, Json(props)).into_response(),
        Ok(props) => (StatusCode::NOT_FOUND, Json(props)).into_response(),
        Err(e) => ErrorResponse::from(e)
            .with_details(path.to_string())
            .into_response(),
    }
}

/// Resolve a two-segment route.
async fn page_handler<S, B, P>(
    State(state): State<ServiceState<S, B, P>>,
    Path((prefix, slug)): Path<(String, String)>,
    Query(query): Query<PageQuery>,
) -> Response
where
    S: DocumentStore + 'static,
    B: ContentBackend + 'static,
    P: PostProcessor + 'static,
{
    let path = RoutePath::new(prefix, slug, Vec::new());
    render_page(&state, path, query.locale).await
}

/// Resolve a deep (catch-all) route.
async fn deep_page_handler<S, B, P>(
    State(state): State<ServiceState<S, B, P>>,
    Path((prefix, slug, suffix)): Path<(String, String, String)>,
    Query(query): Query<PageQuery>,
) -> Response
where
    S: DocumentStore + 'static,
    B: ContentBackend + 'static,
    P: PostProcessor + 'static,
{
    // One trailing slash is tolerated; any other empty segment is a 400.
    let suffix = suffix.strip_suffix('/').unwrap_or(suffix.as_str());
    let trailing: Vec<String> = if suffix.is_empty() {
        Vec::new()
    } else {
        suffix.split('/').map(str::to_string).collect()
    };
    let path = RoutePath::new(prefix, slug, trailing);
    render_page(&state, path, query.locale).await
}

/// List static paths from the current catalog.
async fn static_paths_handler<S, B, P>(
    State(state): State<ServiceState<S, B, P>>,
) -> Result<Json<StaticPathsResponse>, ErrorResponse>
where
    S: DocumentStore + 'static,
    B: ContentBackend + 'static,
    P: PostProcessor + 'static,
{
    let paths = state.resolver.static_paths().await?;
    Ok(Json(StaticPathsResponse {
        paths: paths.iter().map(StaticPathDto::from).collect(),
    }))
}

/// Health check endpoint.
async fn health_handler<S, B, P>(
    State(state): State<ServiceState<S, B, P>>,
) -> Json<HealthResponse>
where
    S: DocumentStore + 'static,
    B: ContentBackend + 'static,
    P: PostProcessor + 'static,
{
    let config = state.config();
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        locale_tags: config.locale_tags.clone(),
        revalidate: config.revalidate(),
    })
}

/// Liveness probe endpoint.
async fn liveness_handler() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "alive".to_string(),
    })
}

// ============================================================================
// Router Construction
// ============================================================================

/// Create the Axum router for the slug resolver service.
pub fn create_router<S, B, P>(state: ServiceState<S, B, P>) -> Router
where
    S: DocumentStore + 'static,
    B: ContentBackend + 'static,
    P: PostProcessor + 'static,
{
    Router::new()
        // Page resolution
        .route("/posts/:prefix/:slug", get(page_handler::<S, B, P>))
        .route("/posts/:prefix/:slug/*suffix", get(deep_page_handler::<S, B, P>))
        // Pre-rendering
        .route("/api/paths", get(static_paths_handler::<S, B, P>))
        // Health checks
        .route("/health", get(health_handler::<S, B, P>))
        .route("/health/live", get(liveness_handler))
        .with_state(state)
}
