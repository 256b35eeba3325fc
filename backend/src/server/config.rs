//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use bloglist::domain::BlogPolicy;
use bloglist::outbound::persistence::DbPool;
use bloglist::outbound::token::JwtTokenService;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tokens: Arc<JwtTokenService>,
    pub(crate) policy: BlogPolicy,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, tokens: JwtTokenService, policy: BlogPolicy) -> Self {
        Self {
            bind_addr,
            tokens: Arc::new(tokens),
            policy,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the PostgreSQL repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
