//! Url API route configuration.

use crate::api::handlers::{create_url_handler, update_url_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{patch, post},
};

/// Url management routes.
///
/// # Endpoints
///
/// - `POST  /url`       - Create a url record
/// - `PATCH /url/{id}`  - Partially update a url record
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/url", post(create_url_handler))
        .route("/url/{id}", patch(update_url_handler))
}
