// rest_api/src/handlers/public.rs

//! Public pages: every request loads its collection afresh and filters it.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use directory::{
    facets_from_pairs, is_valid_email, resolve::load_categories, DirectoryEntity, EntityListStore, FilterQuery,
    LoadMode, LoadOutcome, NotificationLog, Notifier,
};
use models::{Doctor, FieldErrors, Hospital, ListingKind, MedicalShop, PathologyLab};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::{parse_kind, split_params, success};
use crate::error::{ApiError, OrNotify};
use crate::extract::JsonBody;
use crate::state::AppState;

// Handler for /api/v1/directory/:kind
pub async fn list_directory(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    match parse_kind(&kind).or_notify(&log)? {
        ListingKind::Doctor => directory_page::<Doctor>(&state, params, &log).await,
        ListingKind::Hospital => directory_page::<Hospital>(&state, params, &log).await,
        ListingKind::PathologyLab => directory_page::<PathologyLab>(&state, params, &log).await,
        ListingKind::MedicalShop => directory_page::<MedicalShop>(&state, params, &log).await,
    }
}

async fn directory_page<T: DirectoryEntity>(
    state: &AppState,
    params: Vec<(String, String)>,
    log: &NotificationLog,
) -> Result<Json<Value>, ApiError> {
    let (term, facet_pairs) = split_params(params);
    let facets = facets_from_pairs::<T>(facet_pairs).or_notify(log)?;

    let gateway = state.gateway();
    let mut store = EntityListStore::<T>::new(LoadMode::Directory);
    let outcome = store.load(gateway.as_ref(), log).await.or_notify(log)?;

    let query = FilterQuery::new().with_term(&term).with_facets(facets);
    let visible = store.view(&query);
    Ok(success(
        json!({
            "kind": T::KIND.slug(),
            "total": store.len(),
            "count": visible.len(),
            "fallback": matches!(outcome, LoadOutcome::Fallback(_)),
            "records": visible,
        }),
        log,
    ))
}

// Handler for /api/v1/categories
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    let gateway = state.gateway();
    let categories = load_categories(gateway.as_ref()).await.or_notify(&log)?;
    Ok(success(categories, &log))
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Name is required");
        }
        if self.email.trim().is_empty() {
            errors.add("email", "Email is required");
        } else if !is_valid_email(self.email.trim()) {
            errors.add("email", "Enter a valid email address");
        }
        if self.message.trim().is_empty() {
            errors.add("message", "Message is required");
        }
        errors.into_result(())
    }
}

// Handler for /api/v1/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ContactRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let log = NotificationLog::new();
    request.validate().or_notify(&log)?;

    let received = state
        .inbox
        .write()
        .await
        .submit(&request.name, &request.email, &request.subject, &request.message);
    info!(id = %received.id, "contact message received");
    log.success("Thank you! Your message has been sent.");
    Ok((StatusCode::CREATED, success(json!({ "id": received.id }), &log)))
}
