//! Append-only in-memory bond store.

use std::sync::Mutex;

use async_trait::async_trait;

use super::poisoned;
use crate::domain::ports::{BondRepository, BondRepositoryError};
use crate::domain::{Bond, BondFilter, BondId, NewBond, UserId};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    bonds: Vec<Bond>,
}

/// Bond store holding records in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBondRepository {
    state: Mutex<State>,
}

#[async_trait]
impl BondRepository for InMemoryBondRepository {
    async fn insert(&self, bond: &NewBond) -> Result<Bond, BondRepositoryError> {
        let mut state = self
            .state
            .lock()
            .map_err(poisoned("bond store"))
            .map_err(BondRepositoryError::query)?;
        state.next_id += 1;
        let stored = Bond::new(BondId::new(state.next_id), bond.clone());
        state.bonds.push(stored.clone());
        Ok(stored)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: &BondFilter,
    ) -> Result<Vec<Bond>, BondRepositoryError> {
        let state = self
            .state
            .lock()
            .map_err(poisoned("bond store"))
            .map_err(BondRepositoryError::query)?;
        Ok(state
            .bonds
            .iter()
            .filter(|bond| bond.owner() == owner && filter.matches(bond))
            .cloned()
            .collect())
    }
}
