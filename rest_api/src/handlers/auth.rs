// rest_api/src/handlers/auth.rs

use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use directory::{is_valid_email, NotificationLog, Notifier};
use models::{Collection, FieldErrors, SessionProfile};
use security::{AuthError, Role};
use serde::Deserialize;
use serde_json::{json, Value};
use storage_gateway::{SelectQuery, Session, SignUpRequest};
use tracing::{info, warn};

use super::{bearer, success};
use crate::error::{ApiError, OrNotify, RestApiError};
use crate::extract::JsonBody;
use crate::state::AppState;

/// Role written to the profile of a self-registered account.
pub const DEFAULT_ROLE: &str = "user";

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl SignUpForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "Email is required");
        } else if !is_valid_email(email) {
            errors.add("email", "Enter a valid email address");
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            errors.add(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
        errors.into_result(())
    }
}

fn session_body(session: &Session) -> Value {
    json!({
        "access_token": session.access_token,
        "user_id": session.user_id,
        "email": session.email,
        "expires_at": session.expires_at,
    })
}

// Handler for /api/v1/auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SignInRequest>,
) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    let session = state
        .auth()
        .sign_in_with_password(request.email.trim(), &request.password)
        .await
        .map_err(AuthError::from)
        .or_notify(&log)?;
    info!(user_id = %session.user_id, "signed in");
    log.success("Signed in successfully");
    Ok(success(session_body(&session), &log))
}

// Handler for /api/v1/auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<SignUpForm>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let log = NotificationLog::new();
    form.validate().or_notify(&log)?;

    let email = form.email.trim().to_string();
    let request = SignUpRequest {
        email: email.clone(),
        password: form.password.clone(),
        metadata: Some(json!({ "full_name": form.full_name, "phone": form.phone })),
    };
    let session = state
        .auth()
        .sign_up(request)
        .await
        .map_err(AuthError::from)
        .or_notify(&log)?;

    let Some(session) = session else {
        log.info("Check your email to confirm your account");
        return Ok((StatusCode::ACCEPTED, success(json!({ "session": null }), &log)));
    };

    let profile = json!({
        "id": session.user_id,
        "email": email,
        "role": DEFAULT_ROLE,
        "full_name": form.full_name,
        "phone": form.phone,
    });
    if let Err(e) = state.gateway().insert(Collection::Profiles, profile).await {
        warn!(user_id = %session.user_id, error = %e, "profile creation failed");
        log.error(&format!("Account created but the profile could not be saved: {e}"));
    } else {
        log.success("Account created successfully");
    }
    Ok((StatusCode::CREATED, success(json!({ "session": session_body(&session) }), &log)))
}

// Handler for /api/v1/auth/sign-out
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    let token = bearer(&headers)
        .ok_or(RestApiError::Auth(AuthError::MissingToken))
        .or_notify(&log)?;
    state
        .auth()
        .sign_out(token)
        .await
        .map_err(AuthError::from)
        .or_notify(&log)?;
    log.success("Signed out");
    Ok(success(json!({ "signed_out": true }), &log))
}

// Handler for /api/v1/auth/session
pub async fn current_session(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    let log = NotificationLog::new();
    let subject = match bearer(&headers) {
        None => None,
        Some(token) => state.sessions.current(token).await.or_notify(&log)?,
    };
    let Some(subject) = subject else {
        return Ok(success(json!({ "authenticated": false }), &log));
    };

    let query = SelectQuery::all().eq("id", subject.user_id.as_str());
    let profile = match state.gateway().select(Collection::Profiles, &query).await {
        Ok(rows) => rows
            .into_iter()
            .next()
            .and_then(|row| serde_json::from_value::<SessionProfile>(row).ok()),
        Err(e) => {
            log.error(&format!("Failed to load profile: {e}"));
            None
        }
    };
    let role = profile.as_ref().map(Role::of).unwrap_or(Role::Unassigned);
    Ok(success(
        json!({
            "authenticated": true,
            "user_id": subject.user_id,
            "email": subject.email,
            "profile": profile,
            "is_admin": role.is_admin(),
            "permissions": role.permissions(),
        }),
        &log,
    ))
}
