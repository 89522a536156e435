//! Service middleware for metrics and request tracking.
//!
//! ## Metrics Exposed
//!
//! - `request_metric` - request count and latency by path, method, status
//! - `resolution_metric` - stage and latency per resolution (emitted by the resolver)

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::info;

/// Metrics middleware that records request counts and latency.
///
/// Uses tracing log lines; aggregation happens downstream.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = normalize_path(request.uri().path());

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status().as_u16();

    info!(
        target: "slug_resolver::metrics",
        metric_type = "request",
        path = %path,
        method = %method,
        status = status,
        latency_ms = latency.as_millis() as u64,
        "request_metric"
    );

    response
}

fn id_regex() -> &'static regex_lite::Regex {
    static RE: OnceLock<regex_lite::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex_lite::Regex::new(
            r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}|[0-9a-f]{32}",
        )
        .expect("identifier pattern is valid")
    })
}

/// Normalize path for metrics to avoid high cardinality.
///
/// Replaces dashed and dash-less page identifiers with `:id`.
pub fn normalize_path(path: &str) -> String {
    id_regex().replace_all(path, ":id").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_replaces_dashed_id() {
        let path = "/posts/article/550e8400-e29b-41d4-a716-446655440000";
        assert_eq!(normalize_path(path), "/posts/article/:id");
    }

    #[test]
    fn test_normalize_path_replaces_url_style_id() {
        let path = "/posts/article/hello-0123456789ABCDEF0123456789abcdef";
        assert_eq!(normalize_path(path), "/posts/article/hello-:id");
    }

    #[test]
    fn test_normalize_path_preserves_regular_path() {
        assert_eq!(normalize_path("/health/live"), "/health/live");
    }
}
