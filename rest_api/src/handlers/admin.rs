// rest_api/src/handlers/admin.rs

//! Back-office listing management. Every route here sits behind the admin
//! gate. A list request mounts the kind's store (a full reload); writes
//! reconcile that store after the backend confirms them.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use directory::{dashboard, facets_from_pairs, CrudCommands, FilterQuery, NotificationLog};
use models::{Doctor, Hospital, ListingKind, MedicalShop, PathologyLab, RecordId};
use serde_json::{json, Value};

use super::{parse_id, parse_kind, split_params, success};
use crate::error::{ApiError, OrNotify, RestApiError};
use crate::extract::JsonBody;
use crate::state::{AdminListing, AppState};

macro_rules! dispatch {
    ($kind:expr, $handler:ident, $($arg:expr),*) => {
        match $kind {
            ListingKind::Doctor => $handler::<Doctor>($($arg),*).await,
            ListingKind::Hospital => $handler::<Hospital>($($arg),*).await,
            ListingKind::PathologyLab => $handler::<PathologyLab>($($arg),*).await,
            ListingKind::MedicalShop => $handler::<MedicalShop>($($arg),*).await,
        }
    };
}

// Handler for /api/v1/admin/dashboard
pub async fn dashboard_handler(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    let gateway = state.gateway();
    let inbox = state.inbox.read().await;
    let stats = dashboard(gateway.as_ref(), &inbox, &log).await;
    Ok(success(stats, &log))
}

// Handler for GET /api/v1/admin/:kind
pub async fn list_listings(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    let kind = parse_kind(&kind).or_notify(&log)?;
    dispatch!(kind, admin_list, &state, params, &log)
}

// Handler for POST /api/v1/admin/:kind
pub async fn create_listing(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let log = NotificationLog::new();
    let kind = parse_kind(&kind).or_notify(&log)?;
    dispatch!(kind, admin_create, &state, body, &log)
}

// Handler for PUT /api/v1/admin/:kind/:id
pub async fn update_listing(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    let kind = parse_kind(&kind).or_notify(&log)?;
    let id = parse_id(&id).or_notify(&log)?;
    dispatch!(kind, admin_update, &state, &id, body, &log)
}

// Handler for DELETE /api/v1/admin/:kind/:id
pub async fn delete_listing(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    let kind = parse_kind(&kind).or_notify(&log)?;
    let id = parse_id(&id).or_notify(&log)?;
    dispatch!(kind, admin_delete, &state, &id, &log)
}

async fn admin_list<T: AdminListing>(
    state: &AppState,
    params: Vec<(String, String)>,
    log: &NotificationLog,
) -> Result<Json<Value>, ApiError> {
    let (term, facet_pairs) = split_params(params);
    let facets = facets_from_pairs::<T>(facet_pairs).or_notify(log)?;

    let gateway = state.gateway();
    let mut store = T::store(&state.admin).write().await;
    store.load(gateway.as_ref(), log).await.or_notify(log)?;

    let query = FilterQuery::new().with_term(&term).with_facets(facets);
    let visible = store.view(&query);
    Ok(success(
        json!({
            "kind": T::KIND.slug(),
            "total": store.len(),
            "count": visible.len(),
            "records": visible,
        }),
        log,
    ))
}

fn parse_form<T: AdminListing>(body: Value) -> Result<T::Form, RestApiError> {
    serde_json::from_value(body)
        .map_err(|e| RestApiError::InvalidInput(format!("Malformed {} form: {}", T::KIND.label().to_lowercase(), e)))
}

async fn admin_create<T: AdminListing>(
    state: &AppState,
    body: Value,
    log: &NotificationLog,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let form = parse_form::<T>(body).or_notify(log)?;
    let gateway = state.gateway();
    let mut store = T::store(&state.admin).write().await;
    let created = CrudCommands::new(gateway.as_ref(), log)
        .create(&mut *store, &form)
        .await
        .or_notify(log)?;
    Ok((StatusCode::CREATED, success(created, log)))
}

async fn admin_update<T: AdminListing>(
    state: &AppState,
    id: &RecordId,
    body: Value,
    log: &NotificationLog,
) -> Result<Json<Value>, ApiError> {
    let form = parse_form::<T>(body).or_notify(log)?;
    let gateway = state.gateway();
    let mut store = T::store(&state.admin).write().await;
    let updated = CrudCommands::new(gateway.as_ref(), log)
        .update(&mut *store, id, &form)
        .await
        .or_notify(log)?;
    Ok(success(updated, log))
}

async fn admin_delete<T: AdminListing>(
    state: &AppState,
    id: &RecordId,
    log: &NotificationLog,
) -> Result<Json<Value>, ApiError> {
    let gateway = state.gateway();
    let mut store = T::store(&state.admin).write().await;
    CrudCommands::new(gateway.as_ref(), log)
        .delete(&mut *store, id)
        .await
        .or_notify(log)?;
    Ok(success(json!({ "id": id, "remaining": store.len() }), log))
}
