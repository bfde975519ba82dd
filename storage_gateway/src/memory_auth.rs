// storage_gateway/src/memory_auth.rs

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use log::{debug, info};
use models::{GatewayError, GatewayResult, RecordId};
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::auth::{AccessClaims, Session, SessionEvent, SessionEvents, SignUpRequest};
use crate::AuthGateway;

#[derive(Debug, Clone)]
struct Account {
    user_id: RecordId,
    email: String,
    password_hash: String,
}

/// Stand-in for the hosted auth provider: argon2-hashed accounts, HS256
/// access tokens signed with the configured secret, revocation on sign-out.
pub struct InMemoryAuth {
    accounts: RwLock<HashMap<String, Account>>,
    sessions: RwLock<HashMap<String, Session>>,
    signing_key: Vec<u8>,
    token_ttl_secs: u64,
    events: SessionEvents,
}

impl InMemoryAuth {
    pub fn new(signing_key: impl Into<Vec<u8>>, token_ttl_secs: u64) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            sessions: RwLock::new(HashMap::new()),
            signing_key: signing_key.into(),
            token_ttl_secs,
            events: SessionEvents::new(),
        }
    }

    /// Registers an account without issuing a session and returns its
    /// subject id.
    pub async fn register(&self, email: &str, password: &str) -> GatewayResult<RecordId> {
        let key = email.trim().to_lowercase();
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(GatewayError::Status {
                status: 422,
                message: "User already registered".to_string(),
            });
        }
        let account = Account {
            user_id: RecordId::from(Uuid::new_v4()),
            email: key.clone(),
            password_hash: hash_password(password)?,
        };
        let user_id = account.user_id.clone();
        accounts.insert(key, account);
        info!("InMemoryAuth: registered {}", email);
        Ok(user_id)
    }

    async fn issue_session(&self, account: &Account) -> GatewayResult<Session> {
        let now = unix_now()?;
        let claims = AccessClaims {
            sub: account.user_id.to_string(),
            email: Some(account.email.clone()),
            exp: now + self.token_ttl_secs,
            iat: now,
            role: Some("authenticated".to_string()),
        };
        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.signing_key),
        )
        .map_err(|e| GatewayError::Auth(format!("Failed to encode access token: {e}")))?;

        let session = Session {
            access_token: access_token.clone(),
            user_id: account.user_id.clone(),
            email: Some(account.email.clone()),
            expires_at: Some(claims.exp as i64),
        };
        self.sessions.write().await.insert(access_token, session.clone());
        self.events.publish(SessionEvent::SignedIn {
            user_id: account.user_id.clone(),
        });
        Ok(session)
    }
}

fn unix_now() -> GatewayResult<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| GatewayError::Auth(format!("System time error: {e}")))
}

fn hash_password(password: &str) -> GatewayResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| GatewayError::Auth(format!("Failed to hash password: {e}")))
}

fn verify_password(password: &str, hashed: &str) -> GatewayResult<bool> {
    let parsed = PasswordHash::new(hashed)
        .map_err(|e| GatewayError::Auth(format!("Failed to parse password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[async_trait]
impl AuthGateway for InMemoryAuth {
    async fn get_session(&self, access_token: &str) -> GatewayResult<Option<Session>> {
        let sessions = self.sessions.read().await;
        let Some(session) = sessions.get(access_token) else {
            return Ok(None);
        };
        let now = unix_now()? as i64;
        if session.expires_at.is_some_and(|exp| exp <= now) {
            debug!("InMemoryAuth: expired session for {}", session.user_id);
            return Ok(None);
        }
        Ok(Some(session.clone()))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let account = self
            .accounts
            .read()
            .await
            .get(&email.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| GatewayError::Auth("Invalid login credentials".to_string()))?;
        if !verify_password(password, &account.password_hash)? {
            return Err(GatewayError::Auth("Invalid login credentials".to_string()));
        }
        self.issue_session(&account).await
    }

    async fn sign_up(&self, request: SignUpRequest) -> GatewayResult<Option<Session>> {
        self.register(&request.email, &request.password).await?;
        self.sign_in_with_password(&request.email, &request.password)
            .await
            .map(Some)
    }

    async fn sign_out(&self, access_token: &str) -> GatewayResult<()> {
        if let Some(session) = self.sessions.write().await.remove(access_token) {
            self.events.publish(SessionEvent::SignedOut {
                user_id: session.user_id,
            });
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
