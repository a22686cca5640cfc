//! DTOs for url create and update endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{NewUrl, UrlChanges, UrlRecord};

/// Request body for `POST /url`.
///
/// A missing `url` deserializes to an empty string so it is reported as a
/// `required` violation rather than a decode failure.
#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    #[serde(default)]
    pub url: String,

    /// Optional caller-chosen alias; empty means "generate one".
    pub alias: Option<String>,
}

impl From<CreateUrlRequest> for NewUrl {
    fn from(req: CreateUrlRequest) -> Self {
        NewUrl {
            target_url: req.url,
            alias: non_empty(req.alias),
        }
    }
}

/// Request body for `PATCH /url/{id}`.
///
/// Absent or empty fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUrlRequest {
    pub alias: Option<String>,
    pub url: Option<String>,
}

impl From<UpdateUrlRequest> for UrlChanges {
    fn from(req: UpdateUrlRequest) -> Self {
        UrlChanges {
            alias: non_empty(req.alias),
            target_url: non_empty(req.url),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Response for a created url.
#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub status: &'static str,
    pub id: i64,
    pub alias: String,
    pub url: String,
}

impl From<UrlRecord> for CreateUrlResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            status: STATUS_OK,
            id: record.id,
            alias: record.alias,
            url: record.target_url,
        }
    }
}

/// Bare success marker.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: STATUS_OK }
    }
}

const STATUS_OK: &str = "OK";
