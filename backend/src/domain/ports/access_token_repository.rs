//! Port for issued access tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{TokenFingerprint, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token repository adapters.
    pub enum AccessTokenRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "token repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "token repository query failed: {message}",
    }
}

/// Live tokens kept per account; storing another evicts the oldest.
pub const MAX_TOKENS_PER_USER: usize = 5;

/// Port mapping token fingerprints to their accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    /// Record a freshly issued token for `user_id`.
    ///
    /// Adapters keep only the [`MAX_TOKENS_PER_USER`] most recently issued
    /// tokens per account, revoking older ones.
    async fn store(
        &self,
        fingerprint: &TokenFingerprint,
        user_id: &UserId,
        issued_at: DateTime<Utc>,
    ) -> Result<(), AccessTokenRepositoryError>;

    /// Resolve the account a token was issued to.
    async fn resolve(
        &self,
        fingerprint: &TokenFingerprint,
    ) -> Result<Option<UserId>, AccessTokenRepositoryError>;
}
