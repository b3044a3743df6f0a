//! Driven port for resolving legal names from a legal-entity registry.
//!
//! The domain owns the lookup contract so bond intake can be exercised with a
//! deterministic double instead of the GLEIF HTTP adapter.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::Lei;

use super::define_port_error;

/// One entity record returned by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalEntity {
    /// Registered legal name.
    pub legal_name: String,
}

impl LegalEntity {
    /// Build a record with the given legal name.
    pub fn new(legal_name: impl Into<String>) -> Self {
        Self {
            legal_name: legal_name.into(),
        }
    }
}

define_port_error! {
    /// Errors surfaced while calling the registry.
    pub enum LegalEntityRegistryError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "registry transport failed: {message}",
        /// Registry call exceeded its timeout.
        Timeout { message: String } =>
            "registry timeout: {message}",
        /// Registry answered with a non-success status.
        Status { status: u16, message: String } =>
            "registry returned status {status}: {message}",
        /// Registry response could not be decoded.
        Decode { message: String } =>
            "registry response decode failed: {message}",
    }
}

/// Port for looking up entities by LEI.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LegalEntityRegistry: Send + Sync {
    /// Return the entities registered under `lei`, in registry order.
    ///
    /// Only the first entry is used by callers, so adapters may stop after it.
    /// An empty vector means the registry answered but knows no such entity.
    async fn lookup(&self, lei: &Lei) -> Result<Vec<LegalEntity>, LegalEntityRegistryError>;
}

/// Deterministic in-process registry.
///
/// # Examples
///
/// ```
/// use bonds_backend::domain::Lei;
/// use bonds_backend::domain::ports::{FixtureLegalEntityRegistry, LegalEntityRegistry};
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let registry = FixtureLegalEntityRegistry::default()
///     .with_entity("R0MUWSFPU8MPRO8K5P83", "BNP PARIBAS");
/// let lei = Lei::new("R0MUWSFPU8MPRO8K5P83").expect("valid LEI");
/// let entities = registry.lookup(&lei).await.expect("fixture lookup");
/// assert_eq!(entities[0].legal_name, "BNP PARIBAS");
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixtureLegalEntityRegistry {
    entities: BTreeMap<String, Vec<LegalEntity>>,
    outage: Option<LegalEntityRegistryError>,
}

impl FixtureLegalEntityRegistry {
    /// Register another entity under `lei`, after any existing ones.
    #[must_use]
    pub fn with_entity(mut self, lei: impl Into<String>, legal_name: impl Into<String>) -> Self {
        self.entities
            .entry(lei.into())
            .or_default()
            .push(LegalEntity::new(legal_name));
        self
    }

    /// Fail every lookup with `error`.
    #[must_use]
    pub fn failing_with(mut self, error: LegalEntityRegistryError) -> Self {
        self.outage = Some(error);
        self
    }
}

#[async_trait]
impl LegalEntityRegistry for FixtureLegalEntityRegistry {
    async fn lookup(&self, lei: &Lei) -> Result<Vec<LegalEntity>, LegalEntityRegistryError> {
        if let Some(error) = &self.outage {
            return Err(error.clone());
        }
        Ok(self.entities.get(lei.as_str()).cloned().unwrap_or_default())
    }
}
