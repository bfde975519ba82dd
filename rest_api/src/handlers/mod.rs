// rest_api/src/handlers/mod.rs

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use directory::NotificationLog;
use models::{DirectoryError, ListingKind, RecordId};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::RestApiError;

pub mod admin;
pub mod auth;
pub mod messages;
pub mod preferences;
pub mod public;

/// Query-string key carrying the free-text search term.
pub const TERM_PARAM: &str = "q";

/// `{ status, data, notifications }`, draining the request's notifications.
pub fn success(data: impl Serialize, log: &NotificationLog) -> Json<Value> {
    Json(json!({
        "status": "success",
        "data": data,
        "notifications": log.take(),
    }))
}

pub fn parse_kind(raw: &str) -> Result<ListingKind, RestApiError> {
    raw.parse::<ListingKind>()
        .map_err(|e| RestApiError::Directory(DirectoryError::NotFound(e)))
}

pub fn parse_id(raw: &str) -> Result<RecordId, RestApiError> {
    RecordId::new(raw).map_err(|e| RestApiError::InvalidInput(e.to_string()))
}

/// Separates the search term from facet pairs.
pub fn split_params(params: Vec<(String, String)>) -> (String, Vec<(String, String)>) {
    let mut term = String::new();
    let mut facets = Vec::new();
    for (key, value) in params {
        if key == TERM_PARAM {
            term = value;
        } else {
            facets.push((key, value));
        }
    }
    (term, facets)
}

pub fn bearer(headers: &HeaderMap) -> Option<&str> {
    security::bearer_token(headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()))
}

// Handler for the /api/v1/health endpoint
pub async fn health_check_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "message": "Directory API is healthy" })))
}

// Handler for the /api/v1/version endpoint
pub async fn version_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "version": env!("CARGO_PKG_VERSION"), "api_level": 1 })))
}
