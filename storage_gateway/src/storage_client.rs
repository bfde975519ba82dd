// storage_gateway/src/storage_client.rs

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use models::{Collection, GatewayError, GatewayResult, RecordId};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::broadcast;

use crate::auth::{Session, SessionEvent, SessionEvents, SignUpRequest};
use crate::query::SelectQuery;
use crate::{AuthGateway, Gateway};

/// HTTP client for the hosted backend: the row API under `/rest/v1` and the
/// auth API under `/auth/v1`.
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: Client,
    base_url: String,
    api_key: String,
    events: SessionEvents,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: RecordId,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| Utc::now().timestamp() + secs));
        Session {
            access_token: self.access_token,
            user_id: self.user.id,
            email: self.user.email,
            expires_at,
        }
    }
}

impl StorageClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for the hosted backend")?;
        debug!("StorageClient: created client for {}", base_url);
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            events: SessionEvents::new(),
        })
    }

    fn rest_url(&self, collection: Collection) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection.as_str())
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn with_keys(&self, request: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(bearer.unwrap_or(&self.api_key))
    }

    async fn send(&self, request: RequestBuilder) -> GatewayResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| status.to_string());
        warn!("StorageClient: backend answered {}: {}", status, message);
        Err(match status {
            StatusCode::NOT_FOUND => GatewayError::NotFound(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Auth(message),
            other => GatewayError::Status {
                status: other.as_u16(),
                message,
            },
        })
    }

    async fn json<T: for<'de> Deserialize<'de>>(response: Response) -> GatewayResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// Pulls a human readable message out of a backend error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// The row API answers writes with the affected rows; an empty list means
/// the key matched nothing.
fn single_row(rows: Vec<Value>, what: String) -> GatewayResult<Value> {
    rows.into_iter().next().ok_or(GatewayError::NotFound(what))
}

#[async_trait]
impl Gateway for StorageClient {
    async fn select(&self, collection: Collection, query: &SelectQuery) -> GatewayResult<Vec<Value>> {
        debug!("StorageClient: select {} {:?}", collection, query);
        let request = self
            .http
            .get(self.rest_url(collection))
            .query(&query.to_query_pairs());
        let response = self.send(self.with_keys(request, None)).await?;
        Self::json(response).await
    }

    async fn insert(&self, collection: Collection, row: Value) -> GatewayResult<Value> {
        debug!("StorageClient: insert into {}", collection);
        let request = self
            .http
            .post(self.rest_url(collection))
            .header("Prefer", "return=representation")
            .json(&row);
        let response = self.send(self.with_keys(request, None)).await?;
        let rows: Vec<Value> = Self::json(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| GatewayError::Decode(format!("insert into {collection} returned no row")))
    }

    async fn update(&self, collection: Collection, id: &RecordId, patch: Value) -> GatewayResult<Value> {
        debug!("StorageClient: update {}/{}", collection, id);
        let request = self
            .http
            .patch(self.rest_url(collection))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&patch);
        let response = self.send(self.with_keys(request, None)).await?;
        single_row(Self::json(response).await?, format!("{collection}/{id}"))
    }

    async fn delete(&self, collection: Collection, id: &RecordId) -> GatewayResult<()> {
        debug!("StorageClient: delete {}/{}", collection, id);
        let request = self
            .http
            .delete(self.rest_url(collection))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation");
        let response = self.send(self.with_keys(request, None)).await?;
        single_row(Self::json(response).await?, format!("{collection}/{id}")).map(|_| ())
    }
}

#[async_trait]
impl AuthGateway for StorageClient {
    async fn get_session(&self, access_token: &str) -> GatewayResult<Option<Session>> {
        let request = self.http.get(self.auth_url("user"));
        match self.send(self.with_keys(request, Some(access_token))).await {
            Ok(response) => {
                let user: AuthUser = Self::json(response).await?;
                Ok(Some(Session {
                    access_token: access_token.to_string(),
                    user_id: user.id,
                    email: user.email,
                    expires_at: None,
                }))
            }
            Err(GatewayError::Auth(_)) | Err(GatewayError::NotFound(_)) => Ok(None),
            Err(other) => Err(other),
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let request = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        let response = self.send(self.with_keys(request, None)).await.map_err(|e| match e {
            GatewayError::Status { status: 400, message } => GatewayError::Auth(message),
            other => other,
        })?;
        let session = Self::json::<TokenResponse>(response).await?.into_session();
        self.events.publish(SessionEvent::SignedIn {
            user_id: session.user_id.clone(),
        });
        Ok(session)
    }

    async fn sign_up(&self, request: SignUpRequest) -> GatewayResult<Option<Session>> {
        let body = json!({
            "email": request.email,
            "password": request.password,
            "data": request.metadata.unwrap_or(Value::Null),
        });
        let http_request = self.http.post(self.auth_url("signup")).json(&body);
        let response = self.send(self.with_keys(http_request, None)).await?;
        let value: Value = Self::json(response).await?;
        if value.get("access_token").is_none() {
            // Confirmation email sent; no session yet.
            return Ok(None);
        }
        let session = serde_json::from_value::<TokenResponse>(value)?.into_session();
        self.events.publish(SessionEvent::SignedIn {
            user_id: session.user_id.clone(),
        });
        Ok(Some(session))
    }

    async fn sign_out(&self, access_token: &str) -> GatewayResult<()> {
        let session = self.get_session(access_token).await?;
        let request = self.http.post(self.auth_url("logout"));
        self.send(self.with_keys(request, Some(access_token))).await?;
        if let Some(session) = session {
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
