//! Server configuration loaded via OrthoConfig.
//!
//! Values come from `BONDS_*` environment variables or CLI flags. The port and
//! registry timeout carry OrthoConfig defaults; accessors supply the rest.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::gleif::DEFAULT_GLEIF_ENDPOINT;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Runtime settings for the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BONDS")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL URL. Without one the server keeps records in memory.
    pub database_url: Option<String>,
    /// GLEIF LEI lookup endpoint.
    pub gleif_endpoint: Option<String>,
    /// Per-request timeout for GLEIF lookups, in seconds.
    #[ortho_config(default = 30)]
    pub gleif_timeout_secs: u64,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Socket address assembled from [`Self::host`] and [`Self::port`].
    ///
    /// # Errors
    /// Returns [`std::net::AddrParseError`] when the host is not an IP literal.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host(), self.port()).parse()
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    pub fn gleif_endpoint(&self) -> &str {
        self.gleif_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GLEIF_ENDPOINT)
    }

    pub fn gleif_timeout(&self) -> Duration {
        Duration::from_secs(self.gleif_timeout_secs)
    }
}
