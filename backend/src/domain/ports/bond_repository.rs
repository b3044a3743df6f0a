//! Port for bond persistence and owner-scoped reads.

use async_trait::async_trait;

use crate::domain::{Bond, BondFilter, NewBond, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by bond repository adapters.
    pub enum BondRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "bond repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "bond repository query failed: {message}",
    }
}

/// Port for appending bonds and listing an owner's bonds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BondRepository: Send + Sync {
    /// Append a bond and return it with its storage identifier.
    async fn insert(&self, bond: &NewBond) -> Result<Bond, BondRepositoryError>;

    /// List `owner`'s bonds matching `filter`, oldest first.
    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: &BondFilter,
    ) -> Result<Vec<Bond>, BondRepositoryError>;
}
