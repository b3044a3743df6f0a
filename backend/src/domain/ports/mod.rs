//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod access_token_repository;
mod bond_command;
mod bond_query;
mod bond_repository;
mod legal_entity_registry;
mod login_service;
mod registration_service;
mod token_authenticator;
mod user_account_repository;

#[cfg(test)]
pub use access_token_repository::MockAccessTokenRepository;
pub use access_token_repository::{
    AccessTokenRepository, AccessTokenRepositoryError, MAX_TOKENS_PER_USER,
};
#[cfg(test)]
pub use bond_command::MockBondCommand;
pub use bond_command::BondCommand;
#[cfg(test)]
pub use bond_query::MockBondQuery;
pub use bond_query::BondQuery;
#[cfg(test)]
pub use bond_repository::MockBondRepository;
pub use bond_repository::{BondRepository, BondRepositoryError};
#[cfg(test)]
pub use legal_entity_registry::MockLegalEntityRegistry;
pub use legal_entity_registry::{
    FixtureLegalEntityRegistry, LegalEntity, LegalEntityRegistry, LegalEntityRegistryError,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use token_authenticator::MockTokenAuthenticator;
pub use token_authenticator::TokenAuthenticator;
#[cfg(test)]
pub use user_account_repository::MockUserAccountRepository;
pub use user_account_repository::{UserAccountRepository, UserAccountRepositoryError};
