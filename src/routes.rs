//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST  /url`       - Create a url record
//! - `PATCH /url/{id}`  - Update a url record
//! - `GET   /health`    - Health check: DB, visit queue
//! - `GET   /{alias}`   - Alias redirect
//!
//! # Middleware (outermost first)
//!
//! - **Request id** - `x-request-id` assigned (UUID) when absent
//! - **Tracing** - Request span tagged with the request id
//! - **Request id propagation** - Id echoed on the response
//! - **Panic recovery** - Panics become 500 responses
//! - **Timeout** - Per-request deadline
//! - **Path normalization** - Trailing slash handling

use std::time::Duration;

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::state::AppState;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower::{Layer, ServiceBuilder};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;

/// Routes and state without transport middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{alias}", get(redirect_handler))
        .merge(api::routes::url_routes())
        .with_state(state)
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - deadline after which a request is answered with 408
pub fn app_router(state: AppState, request_timeout: Duration) -> NormalizePath<Router> {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(api::middleware::tracing::layer())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ));

    let router = router(state).layer(middleware);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
