// security/src/gate.rs

use directory::Notification;
use models::{Collection, SessionProfile};
use storage_gateway::{Gateway, SelectQuery, SessionEvent};
use tracing::{debug, info, warn};

use crate::roles::Role;
use crate::session::{SessionSource, Subject};

pub const ACCESS_DENIED: &str = "Access denied. Admin privileges required.";

/// Where denied visitors are sent.
pub const DENIED_REDIRECT: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Checking,
    AuthenticatedAdmin(SessionProfile),
    AuthenticatedNonAdmin,
    Unauthenticated,
}

/// What a protected page shows for the current gate state.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome<T> {
    Loading,
    Granted(T),
    Redirect {
        to: &'static str,
        notification: Notification,
    },
}

/// Guards the admin back-office. Starts in [`GateState::Checking`] and
/// settles on one of the three terminal states after [`RoleGate::resolve`].
#[derive(Debug, Clone)]
pub struct RoleGate {
    state: GateState,
}

impl Default for RoleGate {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Checking,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Settles the gate for `access_token`. Any failure while reading the
    /// session or profile denies access.
    pub async fn resolve(
        &mut self,
        sessions: &dyn SessionSource,
        access_token: Option<&str>,
        gateway: &dyn Gateway,
    ) -> &GateState {
        self.state = GateState::Checking;
        let subject = match access_token {
            None => None,
            Some(token) => match sessions.current(token).await {
                Ok(subject) => subject,
                Err(e) => {
                    warn!(error = %e, "session lookup failed; treating as signed out");
                    None
                }
            },
        };

        self.state = match subject {
            None => GateState::Unauthenticated,
            Some(subject) => Self::check_profile(&subject, gateway).await,
        };
        debug!(state = ?self.state, "gate resolved");
        &self.state
    }

    async fn check_profile(subject: &Subject, gateway: &dyn Gateway) -> GateState {
        let query = SelectQuery::all().eq("id", subject.user_id.as_str());
        let rows = match gateway.select(Collection::Profiles, &query).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(user_id = %subject.user_id, error = %e, "profile lookup failed; denying access");
                return GateState::AuthenticatedNonAdmin;
            }
        };
        let Some(row) = rows.into_iter().next() else {
            info!(user_id = %subject.user_id, "no profile for signed-in user");
            return GateState::AuthenticatedNonAdmin;
        };
        match serde_json::from_value::<SessionProfile>(row) {
            Ok(profile) if Role::of(&profile).is_admin() => GateState::AuthenticatedAdmin(profile),
            Ok(profile) => {
                info!(user_id = %profile.id, role = ?profile.role, "non-admin denied");
                GateState::AuthenticatedNonAdmin
            }
            Err(e) => {
                warn!(user_id = %subject.user_id, error = %e, "malformed profile; denying access");
                GateState::AuthenticatedNonAdmin
            }
        }
    }

    /// A sign-in or sign-out invalidates the decision.
    pub fn on_session_change(&mut self, event: &SessionEvent) {
        debug!(user_id = %event.user_id(), "session changed; re-checking");
        self.state = GateState::Checking;
    }

    /// Produces `content` only for an admin. While checking nothing is done.
    pub fn render<T>(&self, content: impl FnOnce(&SessionProfile) -> T) -> GateOutcome<T> {
        match &self.state {
            GateState::Checking => GateOutcome::Loading,
            GateState::AuthenticatedAdmin(profile) => GateOutcome::Granted(content(profile)),
            GateState::AuthenticatedNonAdmin | GateState::Unauthenticated => GateOutcome::Redirect {
                to: DENIED_REDIRECT,
                notification: Notification::error(ACCESS_DENIED),
            },
        }
    }
}
