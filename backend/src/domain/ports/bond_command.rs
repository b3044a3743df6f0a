//! Driving port for bond intake.

use async_trait::async_trait;

use crate::domain::{Bond, BondSubmission, Error, UserId};

/// Domain use-case port for recording bonds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BondCommand: Send + Sync {
    /// Validate, enrich and persist a bond owned by `owner`.
    async fn create_bond(&self, owner: &UserId, submission: BondSubmission) -> Result<Bond, Error>;
}
