//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, UserId};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account and return its identifier.
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error>;
}
