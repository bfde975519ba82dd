// storage_gateway/src/lib.rs

//! The Remote Data Gateway: everything the directory knows about the hosted
//! backend. Row access goes through [`Gateway`], authentication through
//! [`AuthGateway`]. [`StorageClient`] talks to the hosted service over HTTP;
//! [`InMemoryGateway`] and [`InMemoryAuth`] stand in for it in demos and
//! tests.

use async_trait::async_trait;
use models::{Collection, GatewayResult, RecordId};
use serde_json::Value;
use tokio::sync::broadcast;

pub mod auth;
pub mod memory;
pub mod memory_auth;
pub mod query;
pub mod storage_client;

pub use auth::{AccessClaims, Session, SessionEvent, SessionEvents, SignUpRequest};
pub use memory::{InMemoryGateway, Operation};
pub use memory_auth::InMemoryAuth;
pub use query::{Filter, Order, SelectQuery};
pub use storage_client::StorageClient;

/// Row-oriented access to the hosted tables. Every call either succeeds as a
/// whole or returns an error; there is no partial success.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn select(&self, collection: Collection, query: &SelectQuery) -> GatewayResult<Vec<Value>>;

    /// Inserts `row` and returns it as stored, including the server-assigned id.
    async fn insert(&self, collection: Collection, row: Value) -> GatewayResult<Value>;

    /// Applies `patch` to the row keyed by `id` and returns the updated row.
    async fn update(&self, collection: Collection, id: &RecordId, patch: Value) -> GatewayResult<Value>;

    async fn delete(&self, collection: Collection, id: &RecordId) -> GatewayResult<()>;
}

/// The hosted authentication provider.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Resolves an access token to its session; `None` when the token is
    /// unknown, revoked or expired.
    async fn get_session(&self, access_token: &str) -> GatewayResult<Option<Session>>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> GatewayResult<Session>;

    /// Returns `None` when the provider requires email confirmation before
    /// issuing a session.
    async fn sign_up(&self, request: SignUpRequest) -> GatewayResult<Option<Session>>;

    async fn sign_out(&self, access_token: &str) -> GatewayResult<()>;

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;
}
