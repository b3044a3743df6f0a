//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use bonds_backend::outbound::persistence::DbPool;
use url::Url;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) gleif_endpoint: Url,
    pub(crate) gleif_timeout: Duration,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration that keeps records in memory.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, gleif_endpoint: Url, gleif_timeout: Duration) -> Self {
        Self {
            bind_addr,
            gleif_endpoint,
            gleif_timeout,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, bonds, accounts and tokens are stored in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
