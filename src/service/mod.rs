//! Slug Resolver REST Service
//!
//! Exposes resolution to the page-rendering layer.
//!
//! ## Endpoints
//!
//! - `GET /posts/:prefix/:slug` - Resolve a two-segment route
//! - `GET /posts/:prefix/:slug/*suffix` - Resolve a deep route
//! - `GET /api/paths` - Paths to pre-render
//! - `GET /health` - Service health and configuration
//! - `GET /health/live` - Liveness probe
//!
//! Page routes accept `?locale=`. A miss answers 404 with `{"post": null}`;
//! only document store failures answer 500.

pub mod middleware;
pub mod routes;
pub mod state;

pub use middleware::{metrics_middleware, normalize_path};
pub use routes::{create_router, ErrorResponse, PageQuery};
pub use state::ServiceState;
