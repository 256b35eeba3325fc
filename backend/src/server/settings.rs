//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BLOGLIST_*` environment variables and an
//! optional config file. Unset values fall back to the defaults below.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;
use zeroize::Zeroizing;

use bloglist::domain::{BlogFieldPolicy, BlogPolicy, UnknownPolicyName, UpdateAccess};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3003";
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`: {message}")]
    BindAddr { value: String, message: String },
    #[error(transparent)]
    Policy(#[from] UnknownPolicyName),
    #[error("BLOGLIST_TOKEN_SECRET must be set in release builds")]
    MissingTokenSecret,
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOGLIST")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// HS256 signing secret for bearer tokens.
    pub token_secret: Option<String>,
    /// Lifetime of issued tokens in seconds.
    pub token_ttl_secs: Option<u64>,
    /// Required blog fields: `minimal`, `authored` or `linked`.
    pub blog_fields: Option<String>,
    /// Who may update blog fields: `unrestricted` or `owner_only`.
    pub update_access: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim().parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::BindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            }
        })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS))
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Blog field and update rules.
    pub fn blog_policy(&self) -> Result<BlogPolicy, SettingsError> {
        let fields = match self.blog_fields.as_deref() {
            Some(raw) => raw.parse::<BlogFieldPolicy>()?,
            None => BlogFieldPolicy::default(),
        };
        let update_access = match self.update_access.as_deref() {
            Some(raw) => raw.parse::<UpdateAccess>()?,
            None => UpdateAccess::default(),
        };
        Ok(BlogPolicy {
            fields,
            update_access,
        })
    }

    /// Token signing secret.
    ///
    /// Debug builds fall back to a random per-process secret, so tokens do
    /// not survive a restart.
    pub fn token_secret(&self) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        match self.token_secret.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(secret) => Ok(Zeroizing::new(secret.as_bytes().to_vec())),
            None if cfg!(debug_assertions) => {
                warn!("BLOGLIST_TOKEN_SECRET unset; using an ephemeral development secret");
                let mut secret = Uuid::new_v4().as_bytes().to_vec();
                secret.extend_from_slice(Uuid::new_v4().as_bytes());
                Ok(Zeroizing::new(secret))
            }
            None => Err(SettingsError::MissingTokenSecret),
        }
    }
}
