//! Port for account persistence.

use async_trait::async_trait;

use crate::domain::{UserAccount, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum UserAccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "account repository query failed: {message}",
        /// Another account already uses the username.
        DuplicateUsername { username: String } =>
            "username `{username}` is already registered",
    }
}

/// Port for creating accounts and finding them by username.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountRepository: Send + Sync {
    /// Persist a new account, rejecting taken usernames.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserAccountRepositoryError>;

    /// Find an account by exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError>;
}
