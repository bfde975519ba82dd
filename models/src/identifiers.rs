// models/src/identifiers.rs

use core::ops::Deref;
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::GatewayError;

/// The opaque, server-assigned identifier of a stored row. Identifiers are
/// between 1 and 255 bytes; the directory never interprets their content.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize)]
#[serde(try_from = "IdRepr", into = "String")]
pub struct RecordId(String);

/// Rows from the hosted backend may carry numeric or textual keys.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(i64),
}

impl TryFrom<IdRepr> for RecordId {
    type Error = GatewayError;

    fn try_from(value: IdRepr) -> Result<Self, Self::Error> {
        match value {
            IdRepr::Text(s) => Self::new(s),
            IdRepr::Number(n) => Self::new(n.to_string()),
        }
    }
}

impl RecordId {
    /// Creates a new identifier.
    ///
    /// # Errors
    /// Returns `GatewayError::Decode` if `value` is empty or longer than 255
    /// bytes.
    pub fn new(value: impl Into<String>) -> Result<Self, GatewayError> {
        let value = value.into();
        if value.is_empty() || value.len() > u8::MAX as usize {
            return Err(GatewayError::Decode(format!(
                "record identifier must be 1..=255 bytes, got {}",
                value.len()
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for RecordId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for RecordId {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::RecordId;
    use core::str::FromStr;

    #[test]
    fn should_not_create_empty_identifier() {
        assert!(RecordId::new("").is_err());
    }

    #[test]
    fn should_not_create_too_long_identifier() {
        assert!(RecordId::new("a".repeat(256)).is_err());
    }

    #[test]
    fn should_convert_identifier_from_str() {
        let id = RecordId::from_str("doc-1").unwrap();
        assert_eq!(id.as_str(), "doc-1");
        assert_eq!(id.to_string(), "doc-1");
    }

    #[test]
    fn should_accept_numeric_keys_from_rows() {
        let id: RecordId = serde_json::from_value(serde_json::json!(42)).unwrap();
        assert_eq!(&*id, "42");
        let back = serde_json::to_value(&id).unwrap();
        assert_eq!(back, serde_json::json!("42"));
    }
}
