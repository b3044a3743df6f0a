//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BondCommand, BondQuery, LoginService, RegistrationService, TokenAuthenticator,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub bonds: Arc<dyn BondCommand>,
    pub bonds_query: Arc<dyn BondQuery>,
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenAuthenticator>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub bonds: Arc<dyn BondCommand>,
    pub bonds_query: Arc<dyn BondQuery>,
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenAuthenticator>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use bonds_backend::domain::{AccountService, BondService};
    /// use bonds_backend::domain::ports::FixtureLegalEntityRegistry;
    /// use bonds_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use bonds_backend::outbound::memory::{
    ///     InMemoryAccessTokenRepository, InMemoryBondRepository, InMemoryUserAccountRepository,
    /// };
    /// use mockable::DefaultClock;
    ///
    /// let bonds = Arc::new(BondService::new(
    ///     Arc::new(InMemoryBondRepository::default()),
    ///     Arc::new(FixtureLegalEntityRegistry::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let accounts = Arc::new(AccountService::new(
    ///     Arc::new(InMemoryUserAccountRepository::default()),
    ///     Arc::new(InMemoryAccessTokenRepository::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     bonds: bonds.clone(),
    ///     bonds_query: bonds,
    ///     registration: accounts.clone(),
    ///     login: accounts.clone(),
    ///     tokens: accounts,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            bonds,
            bonds_query,
            registration,
            login,
            tokens,
        } = ports;
        Self {
            bonds,
            bonds_query,
            registration,
            login,
            tokens,
        }
    }
}
