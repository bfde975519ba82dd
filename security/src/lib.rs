// security/src/lib.rs

//! Who is signed in, and may they see the admin back-office.
//!
//! [`SessionSource`] turns a bearer token into a [`Subject`], either by asking
//! the hosted auth provider or by verifying the provider's access token
//! locally. [`RoleGate`] then reads the subject's profile and decides whether
//! protected content is produced.

use std::fmt;

use models::GatewayError;

pub mod gate;
pub mod roles;
pub mod session;

pub use gate::{GateOutcome, GateState, RoleGate, ACCESS_DENIED, DENIED_REDIRECT};
pub use roles::{Permission, Role};
pub use session::{ProviderSessions, SessionSource, Subject, TokenVerifier, VerifiedSessions};

/// Custom authentication errors.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    InvalidCredentials,
    MissingToken,
    JwtError(String),
    Provider(GatewayError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::MissingToken => write!(f, "Missing or invalid bearer token"),
            AuthError::JwtError(msg) => write!(f, "JWT error: {}", msg),
            AuthError::Provider(err) => write!(f, "Auth provider error: {}", err),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<GatewayError> for AuthError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Auth(_) => AuthError::InvalidCredentials,
            other => AuthError::Provider(other),
        }
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_requires_scheme_and_value() {
        assert_eq!(bearer_token(Some("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(Some("Bearer   ")), None);
        assert_eq!(bearer_token(Some("Basic abc")), None);
        assert_eq!(bearer_token(None), None);
    }

    #[test]
    fn provider_auth_failures_are_bad_credentials() {
        assert_eq!(
            AuthError::from(GatewayError::Auth("Invalid login credentials".into())),
            AuthError::InvalidCredentials
        );
        assert!(matches!(
            AuthError::from(GatewayError::Network("down".into())),
            AuthError::Provider(_)
        ));
    }
}
