//! Handlers for url create and update endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::url::{CreateUrlRequest, CreateUrlResponse, StatusResponse, UpdateUrlRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a url record.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "alias": "my-link" }
/// ```
///
/// `alias` is optional; when absent or empty a random alias is generated.
///
/// # Response Codes
///
/// - **201 Created**: `{"status":"OK","id":1,"alias":"aB3dE9","url":"https://example.com"}`
/// - **400 Bad Request**: Body is not valid JSON
/// - **409 Conflict**: Supplied alias is taken
/// - **422 Unprocessable Entity**: Field validation failed
pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>), AppError> {
    let Json(request) = payload?;

    let record = state.url_service.create(request.into()).await?;

    tracing::info!(id = record.id, alias = %record.alias, "Url created");

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Partially updates a url record by id.
///
/// # Endpoint
///
/// `PATCH /url/{id}`
///
/// # Request Body
///
/// ```json
/// { "alias": "custom", "url": "https://example.org" }
/// ```
///
/// Both fields are optional. The visit counter cannot be changed here.
///
/// # Response Codes
///
/// - **200 OK**: `{"status":"OK"}`
/// - **400 Bad Request**: `id` is not an integer or body is not valid JSON
/// - **404 Not Found**: No record with this id
/// - **409 Conflict**: New alias is taken
/// - **422 Unprocessable Entity**: Field validation failed
pub async fn update_url_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUrlRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    let id = id
        .parse::<i64>()
        .map_err(|_| AppError::bad_request("Bad id format", json!({ "id": id })))?;

    let Json(request) = payload?;

    state.url_service.update(id, request.into()).await?;

    Ok(Json(StatusResponse::ok()))
}
