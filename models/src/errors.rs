// models/src/errors.rs

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
pub use thiserror::Error;

/// Field-keyed validation messages, e.g. `{ "email": "Email is required" }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`. The first message for a field wins.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(value)` when no message was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        f.write_str(&parts.join("; "))
    }
}

/// Failure reported by the Remote Data Gateway. Callers must not assume any
/// partial success when one of these is returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Backend rejected the request ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Malformed backend response: {0}")]
    Decode(String),
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

/// The error taxonomy surfaced by directory and admin operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("Access denied: {0}")]
    Authorization(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<FieldErrors> for DirectoryError {
    fn from(errors: FieldErrors) -> Self {
        DirectoryError::Validation(errors)
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

pub type DirectoryResult<T> = Result<T, DirectoryError>;
