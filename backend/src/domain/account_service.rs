//! Account registration, login and bearer-token resolution.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    AccessTokenRepository, AccessTokenRepositoryError, LoginService, RegistrationService,
    TokenAuthenticator, UserAccountRepository, UserAccountRepositoryError,
};
use crate::domain::{AccessToken, Credentials, Error, PasswordHash, UserAccount, UserId};

/// Message returned when a username is already registered.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "Username already exists, please provide another.";

const INVALID_CREDENTIALS_MESSAGE: &str = "invalid credentials";

fn map_account_error(error: UserAccountRepositoryError) -> Error {
    match error {
        UserAccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        UserAccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        UserAccountRepositoryError::DuplicateUsername { username } => {
            Error::conflict(DUPLICATE_USERNAME_MESSAGE).with_details(json!({
                "field": "username",
                "value": username,
                "code": "duplicate_username",
            }))
        }
    }
}

fn map_token_error(error: AccessTokenRepositoryError) -> Error {
    match error {
        AccessTokenRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("token repository unavailable: {message}"))
        }
        AccessTokenRepositoryError::Query { message } => {
            Error::internal(format!("token repository error: {message}"))
        }
    }
}

/// Service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService<U, T> {
    accounts: Arc<U>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<U, T> AccountService<U, T> {
    /// Create a service over account and token stores.
    pub fn new(accounts: Arc<U>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts,
            tokens,
            clock,
        }
    }
}

#[async_trait]
impl<U, T> RegistrationService for AccountService<U, T>
where
    U: UserAccountRepository,
    T: AccessTokenRepository,
{
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let account = UserAccount::new(
            UserId::random(),
            credentials.username().clone(),
            PasswordHash::derive(credentials.password()),
            self.clock.utc(),
        );
        self.accounts
            .insert(&account)
            .await
            .map_err(map_account_error)?;
        info!(user_id = %account.id(), username = %account.username(), "account registered");
        Ok(*account.id())
    }
}

#[async_trait]
impl<U, T> LoginService for AccountService<U, T>
where
    U: UserAccountRepository,
    T: AccessTokenRepository,
{
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, Error> {
        let account = self
            .accounts
            .find_by_username(credentials.username())
            .await
            .map_err(map_account_error)?
            .filter(|account| account.password_hash().verify(credentials.password()))
            .ok_or_else(|| {
                warn!(username = %credentials.username(), "login rejected");
                Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
            })?;

        let token = AccessToken::generate();
        self.tokens
            .store(&token.fingerprint(), account.id(), self.clock.utc())
            .await
            .map_err(map_token_error)?;
        info!(user_id = %account.id(), "access token issued");
        Ok(token)
    }
}

#[async_trait]
impl<U, T> TokenAuthenticator for AccountService<U, T>
where
    U: UserAccountRepository,
    T: AccessTokenRepository,
{
    async fn authenticate(&self, token: &AccessToken) -> Result<UserId, Error> {
        self.tokens
            .resolve(&token.fingerprint())
            .await
            .map_err(map_token_error)?
            .ok_or_else(|| Error::unauthorized("invalid or expired access token"))
    }
}
