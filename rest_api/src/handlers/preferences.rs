// rest_api/src/handlers/preferences.rs

use axum::{extract::State, Json};
use directory::{NotificationLog, Notifier, Theme};
use models::FieldErrors;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::success;
use crate::error::{ApiError, OrNotify};
use crate::extract::JsonBody;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    #[serde(default)]
    pub theme: String,
}

// Handler for GET /api/v1/preferences/theme
pub async fn get_theme(State(state): State<AppState>) -> Json<Value> {
    success(json!({ "theme": state.context.theme() }), &NotificationLog::new())
}

// Handler for PUT /api/v1/preferences/theme
pub async fn set_theme(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ThemeRequest>,
) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    let theme = request
        .theme
        .parse::<Theme>()
        .map_err(|e| FieldErrors::single("theme", e))
        .or_notify(&log)?;
    state.context.set_theme(theme);
    info!(%theme, "theme changed");
    log.success(&format!("Theme set to {theme}"));
    Ok(success(json!({ "theme": theme }), &log))
}
