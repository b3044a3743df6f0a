//! Bond records and the legal-entity identifier they reference.
//!
//! Bonds are append-only: a record is created once at intake with the legal
//! name resolved from the registry and never changes afterwards.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use super::UserId;

/// Number of characters in a legal-entity identifier.
pub const LEI_LENGTH: usize = 20;

/// Validation failures for [`Lei`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeiValidationError {
    /// The identifier did not have exactly [`LEI_LENGTH`] characters.
    #[error("LEI must be exactly 20 characters, got {actual}")]
    InvalidLength {
        /// Observed character count.
        actual: usize,
    },
    /// The identifier contained something other than ASCII letters and digits.
    #[error("LEI must be alphanumeric, found {character:?} at position {position}")]
    InvalidCharacter {
        /// Zero-based character index.
        position: usize,
        /// Offending character.
        character: char,
    },
}

/// Legal-entity identifier: exactly twenty ASCII letters or digits.
///
/// Letters are accepted in either case and stored as supplied.
///
/// # Examples
/// ```
/// use bonds_backend::domain::Lei;
///
/// let lei = Lei::new("R0MUWSFPU8MPRO8K5P83").expect("valid LEI");
/// assert_eq!(lei.as_str(), "R0MUWSFPU8MPRO8K5P83");
/// assert!(Lei::new("R0MUWSFPU8MPRO8K5P8-").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lei(String);

impl Lei {
    /// Validate a raw identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, LeiValidationError> {
        let raw = raw.into();
        let actual = raw.chars().count();
        if actual != LEI_LENGTH {
            return Err(LeiValidationError::InvalidLength { actual });
        }
        if let Some((position, character)) = raw
            .chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii_alphanumeric())
        {
            return Err(LeiValidationError::InvalidCharacter {
                position,
                character,
            });
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Lei {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Lei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage-assigned bond identifier; ascending ids follow insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BondId(i64);

impl BondId {
    /// Wrap a storage identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Bond fields proposed by a client, before the LEI is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondSubmission {
    /// Instrument identifier, kept opaque.
    pub isin: String,
    /// Nominal size.
    pub size: i64,
    /// Currency code, stored as supplied.
    pub currency: String,
    /// Maturity date.
    pub maturity: NaiveDate,
    /// Unvalidated legal-entity identifier.
    pub lei: String,
}

/// Enriched bond ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBond {
    /// Owning account.
    pub owner: UserId,
    /// Instrument identifier.
    pub isin: String,
    /// Nominal size.
    pub size: i64,
    /// Currency code.
    pub currency: String,
    /// Maturity date.
    pub maturity: NaiveDate,
    /// Validated legal-entity identifier.
    pub lei: Lei,
    /// Legal name resolved from the registry.
    pub legal_name: String,
    /// Intake timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewBond {
    /// Attach a validated LEI and resolved legal name to a submission.
    #[must_use]
    pub fn enrich(
        owner: UserId,
        submission: BondSubmission,
        lei: Lei,
        legal_name: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        let BondSubmission {
            isin,
            size,
            currency,
            maturity,
            lei: _,
        } = submission;
        Self {
            owner,
            isin,
            size,
            currency,
            maturity,
            lei,
            legal_name,
            created_at,
        }
    }
}

/// Persisted bond record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bond {
    id: BondId,
    record: NewBond,
}

impl Bond {
    /// Pair a stored record with its storage identifier.
    #[must_use]
    pub fn new(id: BondId, record: NewBond) -> Self {
        Self { id, record }
    }

    /// Storage identifier.
    #[must_use]
    pub fn id(&self) -> BondId {
        self.id
    }

    /// Owning account.
    #[must_use]
    pub fn owner(&self) -> &UserId {
        &self.record.owner
    }

    /// Instrument identifier.
    #[must_use]
    pub fn isin(&self) -> &str {
        self.record.isin.as_str()
    }

    /// Nominal size.
    #[must_use]
    pub fn size(&self) -> i64 {
        self.record.size
    }

    /// Currency code.
    #[must_use]
    pub fn currency(&self) -> &str {
        self.record.currency.as_str()
    }

    /// Maturity date.
    #[must_use]
    pub fn maturity(&self) -> NaiveDate {
        self.record.maturity
    }

    /// Legal-entity identifier.
    #[must_use]
    pub fn lei(&self) -> &Lei {
        &self.record.lei
    }

    /// Legal name resolved at intake.
    #[must_use]
    pub fn legal_name(&self) -> &str {
        self.record.legal_name.as_str()
    }

    /// Intake timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.record.created_at
    }
}
