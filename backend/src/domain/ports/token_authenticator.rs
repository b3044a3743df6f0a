//! Driving port for resolving bearer tokens.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, UserId};

/// Resolve a presented token to the account it was issued to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenAuthenticator: Send + Sync {
    /// Return the token's owner, or an `unauthorized` error.
    async fn authenticate(&self, token: &AccessToken) -> Result<UserId, Error>;
}
