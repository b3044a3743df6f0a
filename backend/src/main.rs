//! Backend entry-point: loads settings, applies migrations and serves the API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use bonds_backend::inbound::http::health::HealthState;
use bonds_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use bonds_backend::settings::ServerSettings;
use server::{ServerConfig, create_server};

async fn connect_database(database_url: &str) -> std::io::Result<DbPool> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(|err| std::io::Error::other(format!("database migration failed: {err}")))?;
    info!(applied, "database migrations applied");

    DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|err| std::io::Error::other(format!("database pool setup failed: {err}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(|err| {
        std::io::Error::other(format!("invalid bind address {}: {err}", settings.host()))
    })?;
    let gleif_endpoint = Url::parse(settings.gleif_endpoint()).map_err(|err| {
        std::io::Error::other(format!(
            "invalid GLEIF endpoint {}: {err}",
            settings.gleif_endpoint()
        ))
    })?;

    let mut config = ServerConfig::new(bind_addr, gleif_endpoint, settings.gleif_timeout());
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect_database(database_url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
