//! Builders for HTTP state ports over in-memory or PostgreSQL stores.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use bonds_backend::domain::ports::{
    AccessTokenRepository, BondRepository, LegalEntityRegistry, UserAccountRepository,
};
use bonds_backend::domain::{AccountService, BondService};
use bonds_backend::inbound::http::state::{HttpState, HttpStatePorts};
use bonds_backend::outbound::gleif::GleifHttpRegistry;
use bonds_backend::outbound::memory::{
    InMemoryAccessTokenRepository, InMemoryBondRepository, InMemoryUserAccountRepository,
};
use bonds_backend::outbound::persistence::{
    DieselAccessTokenRepository, DieselBondRepository, DieselUserAccountRepository,
};
use tracing::{info, warn};

use super::ServerConfig;

/// Wire the bond and account services over one family of stores.
fn assemble<B, U, T, L>(bonds: B, accounts: U, tokens: T, registry: Arc<L>) -> HttpState
where
    B: BondRepository + 'static,
    U: UserAccountRepository + 'static,
    T: AccessTokenRepository + 'static,
    L: LegalEntityRegistry + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let bond_service = Arc::new(BondService::new(
        Arc::new(bonds),
        registry,
        Arc::clone(&clock),
    ));
    let account_service = Arc::new(AccountService::new(
        Arc::new(accounts),
        Arc::new(tokens),
        clock,
    ));
    HttpState::new(HttpStatePorts {
        bonds: bond_service.clone(),
        bonds_query: bond_service,
        registration: account_service.clone(),
        login: account_service.clone(),
        tokens: account_service,
    })
}

/// Build the shared HTTP state, choosing stores from the configuration.
///
/// # Errors
/// Returns [`std::io::Error`] when the GLEIF HTTP client cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let registry = GleifHttpRegistry::new(config.gleif_endpoint.clone(), config.gleif_timeout)
        .map_err(|err| std::io::Error::other(format!("GLEIF client setup failed: {err}")))?;
    let registry = Arc::new(registry);
    info!(endpoint = %config.gleif_endpoint, "legal-entity registry configured");

    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL stores");
            assemble(
                DieselBondRepository::new(pool.clone()),
                DieselUserAccountRepository::new(pool.clone()),
                DieselAccessTokenRepository::new(pool.clone()),
                registry,
            )
        }
        None => {
            warn!("no database configured; records are kept in memory and lost on restart");
            assemble(
                InMemoryBondRepository::default(),
                InMemoryUserAccountRepository::default(),
                InMemoryAccessTokenRepository::default(),
                registry,
            )
        }
    };
    Ok(web::Data::new(state))
}
