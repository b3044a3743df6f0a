//! Bond intake and search services.
//!
//! [`BondService`] implements both bond driving ports. Intake checks the LEI
//! before any registry traffic, takes the first registry match as the legal
//! name, and only then persists. Search is always scoped to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{BondCommand, BondQuery, BondRepository, LegalEntityRegistry};
use crate::domain::{
    Bond, BondError, BondFilter, BondFilterTerm, BondSubmission, Error, Lei, NewBond, UserId,
};

/// Service implementing [`BondCommand`] and [`BondQuery`].
#[derive(Clone)]
pub struct BondService<R, L> {
    bond_repo: Arc<R>,
    registry: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<R, L> BondService<R, L> {
    /// Create a service over a bond store and a legal-entity registry.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use bonds_backend::domain::BondService;
    /// # use bonds_backend::domain::ports::FixtureLegalEntityRegistry;
    /// # use bonds_backend::outbound::memory::InMemoryBondRepository;
    /// # use mockable::DefaultClock;
    /// let service = BondService::new(
    ///     Arc::new(InMemoryBondRepository::default()),
    ///     Arc::new(FixtureLegalEntityRegistry::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(bond_repo: Arc<R>, registry: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self {
            bond_repo,
            registry,
            clock,
        }
    }
}

impl<R, L> BondService<R, L>
where
    R: BondRepository,
    L: LegalEntityRegistry,
{
    async fn resolve_legal_name(&self, lei: &Lei) -> Result<String, BondError> {
        let entities = self.registry.lookup(lei).await.map_err(|err| {
            warn!(lei = %lei, error = %err, "legal-entity registry lookup failed");
            BondError::RegistryUnavailable(err)
        })?;
        debug!(lei = %lei, matches = entities.len(), "legal-entity registry answered");

        entities
            .into_iter()
            .next()
            .map(|entity| entity.legal_name)
            .ok_or_else(|| BondError::IdentifierNotFound {
                lei: lei.as_str().to_owned(),
            })
    }

    /// Validate, enrich and persist one submission.
    pub async fn intake(
        &self,
        owner: &UserId,
        submission: BondSubmission,
    ) -> Result<Bond, BondError> {
        let lei = Lei::new(submission.lei.as_str()).map_err(BondError::InvalidIdentifier)?;
        let legal_name = self.resolve_legal_name(&lei).await?;
        let record = NewBond::enrich(*owner, submission, lei, legal_name, self.clock.utc());

        let bond = self.bond_repo.insert(&record).await?;
        info!(
            owner = %owner,
            bond_id = bond.id().get(),
            lei = %bond.lei(),
            "bond recorded"
        );
        Ok(bond)
    }

    /// List the owner's bonds that satisfy every raw filter term.
    pub async fn search<I, V>(&self, owner: &UserId, terms: I) -> Result<Vec<Bond>, BondError>
    where
        I: IntoIterator<Item = (BondFilterTerm, V)>,
        V: AsRef<str>,
    {
        let filter = BondFilter::parse(terms)?;
        let bonds = self.bond_repo.list_for_owner(owner, &filter).await?;
        debug!(owner = %owner, count = bonds.len(), "bond search complete");
        Ok(bonds)
    }
}

#[async_trait]
impl<R, L> BondCommand for BondService<R, L>
where
    R: BondRepository,
    L: LegalEntityRegistry,
{
    async fn create_bond(&self, owner: &UserId, submission: BondSubmission) -> Result<Bond, Error> {
        self.intake(owner, submission).await.map_err(Error::from)
    }
}

#[async_trait]
impl<R, L> BondQuery for BondService<R, L>
where
    R: BondRepository,
    L: LegalEntityRegistry,
{
    async fn list_bonds(
        &self,
        owner: &UserId,
        terms: Vec<(BondFilterTerm, String)>,
    ) -> Result<Vec<Bond>, Error> {
        self.search(owner, terms).await.map_err(Error::from)
    }
}

#[cfg(test)]
#[path = "bond_service_tests.rs"]
mod tests;
