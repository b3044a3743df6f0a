//! Driving port for login.
//!
//! Inbound adapters exchange credentials for a bearer token without knowing
//! how accounts or tokens are stored.

use async_trait::async_trait;

use crate::domain::{AccessToken, Credentials, Error};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a new access token.
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, Error>;
}
