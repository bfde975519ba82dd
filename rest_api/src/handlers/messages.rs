// rest_api/src/handlers/messages.rs

use axum::{
    extract::{Path, Query, State},
    Json,
};
use directory::{NotificationLog, Notifier};
use models::{ContactMessage, FieldErrors, MessageStatus};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_id, success};
use crate::error::{ApiError, OrNotify};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub status: Option<String>,
    pub q: Option<String>,
}

// Handler for GET /api/v1/admin/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    let status = match query.status.as_deref().filter(|s| !s.is_empty() && *s != "all") {
        None => None,
        Some(raw) => Some(
            raw.parse::<MessageStatus>()
                .map_err(|e| FieldErrors::single("status", e))
                .or_notify(&log)?,
        ),
    };

    let inbox = state.inbox.read().await;
    let messages: Vec<ContactMessage> = inbox
        .list(status, query.q.as_deref())
        .into_iter()
        .cloned()
        .collect();
    Ok(success(json!({ "messages": messages, "counts": inbox.counts() }), &log))
}

/// Opening a new message marks it read.
pub async fn get_message(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    let id = parse_id(&id).or_notify(&log)?;
    let message = state.inbox.write().await.open(&id).or_notify(&log)?;
    Ok(success(message, &log))
}

pub async fn reply_message(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    let id = parse_id(&id).or_notify(&log)?;
    let message = state.inbox.write().await.mark_replied(&id).or_notify(&log)?;
    log.success("Message marked as replied");
    Ok(success(message, &log))
}

pub async fn archive_message(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    let id = parse_id(&id).or_notify(&log)?;
    let message = state.inbox.write().await.archive(&id).or_notify(&log)?;
    log.success("Message archived");
    Ok(success(message, &log))
}

pub async fn delete_message(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    let id = parse_id(&id).or_notify(&log)?;
    state.inbox.write().await.delete(&id).or_notify(&log)?;
    log.success("Message deleted successfully");
    Ok(success(json!({ "id": id }), &log))
}
