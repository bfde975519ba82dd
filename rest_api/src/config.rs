// rest_api/src/config.rs

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use config::{Config, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};

pub const DEFAULT_REST_API_PORT: u16 = 8082;

/// Prefix of environment overrides, e.g. `DIRECTORY__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "DIRECTORY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// The hosted backend over HTTP.
    Remote,
    /// In-process tables and accounts, seeded with demo data.
    Memory,
}

impl FromStr for BackendMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(BackendMode::Remote),
            "memory" => Ok(BackendMode::Memory),
            _ => Err(anyhow::anyhow!("Unknown backend mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackendConfig {
    pub mode: BackendMode,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub token_ttl_secs: u64,
}

/// Accounts and listings created when running against in-process tables.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DemoConfig {
    pub admin_email: String,
    pub admin_password: String,
    pub seed_listings: bool,
}

/// Represents the configuration for the REST API server itself.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RestApiConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub auth: AuthConfig,
    pub demo: DemoConfig,
}

impl RestApiConfig {
    /// Checks combinations the file format cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.backend.mode == BackendMode::Remote {
            let url = self.backend.url.as_deref().unwrap_or_default();
            if url.trim().is_empty() {
                anyhow::bail!("backend.url is required when backend.mode is remote");
            }
            if self.backend.api_key.as_deref().unwrap_or_default().trim().is_empty() {
                anyhow::bail!("backend.api_key is required when backend.mode is remote");
            }
        }
        if self.auth.jwt_secret.as_deref().is_some_and(|s| s.len() < 16) {
            anyhow::bail!("auth.jwt_secret must be at least 16 bytes");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// `rest_api/rest_api_config.yaml` next to this crate.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("rest_api_config.yaml")
}

/// Loads defaults, then the YAML file (when it exists), then `DIRECTORY__*`
/// environment variables.
pub fn load_rest_api_config(config_file_path: Option<&Path>) -> Result<RestApiConfig> {
    let default_path = default_config_path();
    let path = config_file_path.unwrap_or(&default_path);

    let mut config_builder = Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", DEFAULT_REST_API_PORT as i64)?
        .set_default("backend.mode", "memory")?
        .set_default("backend.timeout_secs", 10_i64)?
        .set_default("auth.token_ttl_secs", 3600_i64)?
        .set_default("demo.admin_email", "admin@example.com")?
        .set_default("demo.admin_password", "change-me-now")?
        .set_default("demo.seed_listings", true)?;
    if path.exists() {
        config_builder = config_builder.add_source(ConfigFile::from(path));
    }
    config_builder = config_builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config: RestApiConfig = config_builder
        .build()
        .context("Failed to build REST API configuration")?
        .try_deserialize()
        .with_context(|| format!("Failed to parse REST API configuration from {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
