// rest_api/src/middleware.rs

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use security::{GateOutcome, RoleGate, ACCESS_DENIED, DENIED_REDIRECT};

use crate::error::{ApiError, RestApiError};
use crate::handlers::bearer;
use crate::state::AppState;

/// Resolutions attempted while session events keep arriving.
const MAX_GATE_CHECKS: usize = 3;

/// Runs the role gate for every back-office request. Admins continue with
/// their [`models::SessionProfile`] in the request extensions; everyone else
/// gets a 403 carrying the redirect target and the denial notification.
pub async fn require_admin(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let token = bearer(request.headers()).map(str::to_string);
    let gateway = state.gateway();

    let mut changes = state.context.session_changes();
    changes.borrow_and_update();

    let mut gate = RoleGate::new();
    for _ in 0..MAX_GATE_CHECKS {
        gate.resolve(state.sessions.as_ref(), token.as_deref(), gateway.as_ref())
            .await;
        if !changes.has_changed().unwrap_or(false) {
            break;
        }
        // A sign-in or sign-out landed while resolving; the decision is stale.
        let event = changes.borrow_and_update().clone();
        if let Some(event) = event {
            gate.on_session_change(&event);
        }
    }

    match gate.render(|profile| profile.clone()) {
        GateOutcome::Granted(profile) => {
            request.extensions_mut().insert(profile);
            next.run(request).await
        }
        GateOutcome::Redirect { to, notification } => ApiError {
            error: RestApiError::Forbidden {
                message: notification.message.clone(),
                redirect: to,
            },
            notifications: vec![notification],
        }
        .into_response(),
        // Still checking after repeated session changes.
        GateOutcome::Loading => RestApiError::Forbidden {
            message: ACCESS_DENIED.to_string(),
            redirect: DENIED_REDIRECT,
        }
        .into_response(),
    }
}
