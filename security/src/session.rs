// security/src/session.rs

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use models::RecordId;
use storage_gateway::{AccessClaims, AuthGateway, Session};
use tracing::{debug, warn};

use crate::AuthError;

/// The authenticated user behind a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub user_id: RecordId,
    pub email: Option<String>,
}

impl From<Session> for Subject {
    fn from(session: Session) -> Self {
        Subject {
            user_id: session.user_id,
            email: session.email,
        }
    }
}

/// Resolves a bearer token to the current session, if any.
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// `Ok(None)` for unknown, expired or malformed tokens.
    async fn current(&self, access_token: &str) -> Result<Option<Subject>, AuthError>;
}

/// Asks the hosted auth provider on every call.
pub struct ProviderSessions {
    auth: Arc<dyn AuthGateway>,
}

impl ProviderSessions {
    pub fn new(auth: Arc<dyn AuthGateway>) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl SessionSource for ProviderSessions {
    async fn current(&self, access_token: &str) -> Result<Option<Subject>, AuthError> {
        let session = self.auth.get_session(access_token).await.map_err(AuthError::Provider)?;
        Ok(session.map(Subject::from))
    }
}

/// Verifies the provider's HS256 access tokens locally with the shared
/// secret, without a round trip.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AccessClaims, AuthError> {
        decode::<AccessClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::JwtError(format!("Failed to decode or validate JWT: {}", e)))
    }
}

#[async_trait]
impl SessionSource for TokenVerifier {
    async fn current(&self, access_token: &str) -> Result<Option<Subject>, AuthError> {
        let claims = match self.verify(access_token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "rejected access token");
                return Ok(None);
            }
        };
        let user_id = RecordId::new(claims.sub)
            .map_err(|e| AuthError::JwtError(format!("Invalid subject claim: {}", e)))?;
        Ok(Some(Subject {
            user_id,
            email: claims.email,
        }))
    }
}

/// Checks the signature and expiry locally, then asks the provider whether
/// the session is still live. Forged or expired tokens never reach the
/// provider; signed-out tokens are refused by it.
pub struct VerifiedSessions {
    verifier: TokenVerifier,
    provider: ProviderSessions,
}

impl VerifiedSessions {
    pub fn new(verifier: TokenVerifier, provider: ProviderSessions) -> Self {
        Self { verifier, provider }
    }
}

#[async_trait]
impl SessionSource for VerifiedSessions {
    async fn current(&self, access_token: &str) -> Result<Option<Subject>, AuthError> {
        let Some(local) = self.verifier.current(access_token).await? else {
            return Ok(None);
        };
        match self.provider.current(access_token).await? {
            Some(live) if live.user_id == local.user_id => Ok(Some(live)),
            Some(live) => {
                warn!(token_sub = %local.user_id, session_user = %live.user_id, "token subject does not match session");
                Ok(None)
            }
            None => {
                debug!(user_id = %local.user_id, "token is no longer backed by a session");
                Ok(None)
            }
        }
    }
}
