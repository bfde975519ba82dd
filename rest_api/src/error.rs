// rest_api/src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use directory::{Notification, NotificationLog};
use models::{DirectoryError, FieldErrors, GatewayError};
use security::AuthError;
use serde_json::json;
use thiserror::Error;

// Define the REST API error enum
#[derive(Debug, Error)]
pub enum RestApiError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error("Authentication failed: {0}")]
    Auth(AuthError),
    #[error("{message}")]
    Forbidden {
        message: String,
        redirect: &'static str,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl From<GatewayError> for RestApiError {
    fn from(err: GatewayError) -> Self {
        RestApiError::Directory(DirectoryError::Gateway(err))
    }
}

impl From<FieldErrors> for RestApiError {
    fn from(errors: FieldErrors) -> Self {
        RestApiError::Directory(DirectoryError::Validation(errors))
    }
}

impl From<AuthError> for RestApiError {
    fn from(err: AuthError) -> Self {
        RestApiError::Auth(err)
    }
}

impl RestApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            RestApiError::Directory(DirectoryError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            RestApiError::Directory(DirectoryError::NotFound(_)) => StatusCode::NOT_FOUND,
            RestApiError::Directory(DirectoryError::Gateway(GatewayError::NotFound(_))) => StatusCode::NOT_FOUND,
            RestApiError::Directory(DirectoryError::Gateway(_)) => StatusCode::BAD_GATEWAY,
            RestApiError::Directory(DirectoryError::Authorization(_)) => StatusCode::FORBIDDEN,
            RestApiError::Directory(DirectoryError::Unexpected(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            RestApiError::Auth(AuthError::Provider(_)) => StatusCode::BAD_GATEWAY,
            RestApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            RestApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            RestApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RestApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An error response together with the notifications raised before it.
#[derive(Debug)]
pub struct ApiError {
    pub error: RestApiError,
    pub notifications: Vec<Notification>,
}

impl ApiError {
    pub fn new(error: impl Into<RestApiError>, log: &NotificationLog) -> Self {
        Self {
            error: error.into(),
            notifications: log.take(),
        }
    }
}

impl From<RestApiError> for ApiError {
    fn from(error: RestApiError) -> Self {
        Self {
            error,
            notifications: Vec::new(),
        }
    }
}

/// Attaches the request's notifications to a failed result.
pub trait OrNotify<T> {
    fn or_notify(self, log: &NotificationLog) -> Result<T, ApiError>;
}

impl<T, E: Into<RestApiError>> OrNotify<T> for Result<T, E> {
    fn or_notify(self, log: &NotificationLog) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::new(e, log))
    }
}

// Implement IntoResponse for ApiError to convert it into an HTTP response
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let message = match &self.error {
            RestApiError::Directory(DirectoryError::Validation(_)) => "Validation failed".to_string(),
            other => other.to_string(),
        };
        let mut notifications = self.notifications;
        if !notifications.iter().any(|n| n.level == directory::Level::Error) {
            notifications.push(Notification::error(message.clone()));
        }

        let mut body = json!({
            "status": "error",
            "message": message,
            "notifications": notifications,
        });
        match &self.error {
            RestApiError::Directory(DirectoryError::Validation(fields)) => {
                body["fields"] = json!(fields);
            }
            RestApiError::Forbidden { redirect, .. } => {
                body["redirect"] = json!(redirect);
            }
            _ => {}
        }

        if status.is_server_error() {
            tracing::error!(%status, error = %self.error, "request failed");
        } else {
            tracing::debug!(%status, error = %self.error, "request rejected");
        }
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for RestApiError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory::Notifier;

    #[test]
    fn maps_error_kinds_to_statuses() {
        let validation: RestApiError = FieldErrors::single("email", "Email is required").into();
        assert_eq!(validation.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let upstream: RestApiError = GatewayError::Network("down".into()).into();
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
        let missing: RestApiError = GatewayError::NotFound("doctors/1".into()).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            RestApiError::Auth(AuthError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            RestApiError::Directory(DirectoryError::Unexpected("bad row".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn notifications_are_drained_into_the_error() {
        let log = NotificationLog::new();
        log.info("Loading");
        let err: Result<(), ApiError> = Err::<(), _>(RestApiError::InvalidInput("bad".into())).or_notify(&log);
        let err = err.unwrap_err();
        assert_eq!(err.notifications, vec![Notification::info("Loading")]);
        assert!(log.snapshot().is_empty());
    }
}
