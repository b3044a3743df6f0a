//! Driving port for owner-scoped bond search.

use async_trait::async_trait;

use crate::domain::{Bond, BondFilterTerm, Error, UserId};

/// Domain use-case port for listing bonds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BondQuery: Send + Sync {
    /// List `owner`'s bonds matching every raw `(term, value)` pair.
    async fn list_bonds(
        &self,
        owner: &UserId,
        terms: Vec<(BondFilterTerm, String)>,
    ) -> Result<Vec<Bond>, Error>;
}
