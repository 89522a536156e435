//! Content API tests against a mock HTTP server.

#![cfg(feature = "http")]

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use slug_resolver::backend::HttpBackendError;
use slug_resolver::{
    ContentBackend, ExternalContentAdapter, HttpContentBackend, InMemoryDocumentStore,
    NoopPostProcessor, ResolutionStage, ResolverConfig, RoutePath, SlugResolver,
};

fn post_body() -> serde_json::Value {
    json!({
        "id": 7,
        "title": "T",
        "content": "Line1\n\nLine2",
        "summary": "short",
        "tags": ["rust", "rust", "web"],
        "slug": "my-post",
        "created_at": "2024-01-05T00:00:00Z",
    })
}

#[tokio::test]
async fn test_fetch_post_decodes_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/post/slug/my-post");
        then.status(200).json_body(post_body());
    });

    let backend = HttpContentBackend::new(server.base_url());
    let post = backend.fetch_post("my-post").await.unwrap().unwrap();

    mock.assert();
    assert_eq!(post.id, 7);
    assert_eq!(post.slug.as_deref(), Some("my-post"));
    assert_eq!(post.post_type, None);
}

#[tokio::test]
async fn test_fetch_post_not_found_is_none() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/post/slug/missing");
        then.status(404).body("not found");
    });

    let backend = HttpContentBackend::new(server.base_url());
    assert!(backend.fetch_post("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_fetch_post_server_error_is_none() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/post/slug/broken");
        then.status(500);
    });

    let backend = HttpContentBackend::new(server.base_url());
    assert!(backend.fetch_post("broken").await.unwrap().is_none());
}

#[tokio::test]
async fn test_fetch_post_malformed_body_is_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/post/slug/garbled");
        then.status(200).body("{not json");
    });

    let backend = HttpContentBackend::new(server.base_url());
    let result = backend.fetch_post("garbled").await;
    assert!(matches!(result, Err(HttpBackendError::Decode(_))));
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/post/slug/my-post");
        then.status(200).json_body(post_body());
    });

    let backend = HttpContentBackend::new(format!("{}/", server.base_url()));
    assert!(backend.fetch_post("my-post").await.unwrap().is_some());
    mock.assert();
}

#[tokio::test]
async fn test_adapter_swallows_malformed_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/post/slug/garbled");
        then.status(200).body("<html>oops</html>");
    });

    let backend = HttpContentBackend::new(server.base_url());
    let adapted = ExternalContentAdapter::new(&backend)
        .fetch_from_backend("garbled", "en-US")
        .await
        .unwrap();
    assert!(adapted.is_none());
}

#[tokio::test]
async fn test_adapter_keeps_post_with_null_title_and_slug() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/post/slug/untitled");
        then.status(200)
            .json_body(json!({"id": 11, "title": null, "slug": null, "content": null}));
    });

    let backend = HttpContentBackend::new(server.base_url());
    let doc = ExternalContentAdapter::new(&backend)
        .fetch_from_backend("untitled", "en-US")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(doc.id, "page-11");
    assert_eq!(doc.title, "");
    assert!(doc.block_graph.is_trivial());
    assert!(doc.block_graph.root().is_some());
}

#[tokio::test]
async fn test_adapter_swallows_unreachable_backend() {
    // Nothing listens on port 9 (discard) in the test environment.
    let backend = HttpContentBackend::with_timeout("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
    let adapted = ExternalContentAdapter::new(&backend)
        .fetch_from_backend("anything", "en-US")
        .await
        .unwrap();
    assert!(adapted.is_none());
}

#[tokio::test]
async fn test_resolver_synthesizes_from_http_post() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/post/slug/my-post");
        then.status(200).json_body(post_body());
    });

    let resolver = SlugResolver::new(
        Arc::new(InMemoryDocumentStore::new()),
        Arc::new(HttpContentBackend::new(server.base_url())),
        Arc::new(NoopPostProcessor),
        ResolverConfig::default(),
    );
    let path = RoutePath::parse("en/article/my-post").unwrap();
    let resolution = resolver.resolve(&path, None).await.unwrap();

    mock.assert();
    assert_eq!(resolution.stage, ResolutionStage::ContentApi);
    let doc = resolution.document.unwrap().into_document();
    assert_eq!(doc.id, "page-7");
    assert_eq!(doc.block_graph.len(), 3);
    assert_eq!(doc.tags, vec!["rust", "web"]);
    assert_eq!(doc.summary.as_deref(), Some("short"));
}

#[tokio::test]
async fn test_resolver_http_404_resolves_to_none() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/post/slug/my-post");
        then.status(404);
    });

    let resolver = SlugResolver::new(
        Arc::new(InMemoryDocumentStore::new()),
        Arc::new(HttpContentBackend::new(server.base_url())),
        Arc::new(NoopPostProcessor),
        ResolverConfig::default(),
    );
    let path = RoutePath::parse("en/article/my-post").unwrap();
    let props = resolver.page_props(&path, None).await.unwrap();

    mock.assert();
    assert!(props.post.is_none());
}
