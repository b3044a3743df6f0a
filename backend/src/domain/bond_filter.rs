//! Owner-scoped equality filters for bond queries.
//!
//! Raw terms arrive as strings. Surrounding newlines are stripped, `size` and
//! `maturity` are parsed into their stored types, and every supplied term must
//! match for a bond to be selected.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use super::Bond;

/// Accepted textual format for maturity filters.
pub const MATURITY_FORMAT: &str = "%Y-%m-%d";

/// Human-readable form of [`MATURITY_FORMAT`].
pub const MATURITY_FORMAT_HINT: &str = "YYYY-MM-DD";

/// Bond field that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondFilterTerm {
    /// Instrument identifier.
    Isin,
    /// Nominal size.
    Size,
    /// Currency code.
    Currency,
    /// Maturity date.
    Maturity,
    /// Legal-entity identifier.
    Lei,
    /// Resolved legal name.
    LegalName,
}

impl BondFilterTerm {
    /// Every filterable term, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Isin,
        Self::Size,
        Self::Currency,
        Self::Maturity,
        Self::Lei,
        Self::LegalName,
    ];

    /// Query parameter name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Isin => "isin",
            Self::Size => "size",
            Self::Currency => "currency",
            Self::Maturity => "maturity",
            Self::Lei => "lei",
            Self::LegalName => "legal_name",
        }
    }
}

impl fmt::Display for BondFilterTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a term name is not filterable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown bond filter term `{0}`")]
pub struct UnknownFilterTerm(pub String);

impl FromStr for BondFilterTerm {
    type Err = UnknownFilterTerm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|term| term.as_str() == s)
            .ok_or_else(|| UnknownFilterTerm(s.to_owned()))
    }
}

/// A supplied filter value failed to parse as its field's type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BondFilterError {
    /// `size` was not a base-10 integer.
    #[error("size must be a base-10 integer")]
    InvalidSize {
        /// Normalised value that failed to parse.
        value: String,
    },
    /// `maturity` was not a `YYYY-MM-DD` date.
    #[error("maturity must be a date in YYYY-MM-DD format")]
    InvalidMaturity {
        /// Normalised value that failed to parse.
        value: String,
    },
}

impl BondFilterError {
    /// Term whose value was malformed.
    #[must_use]
    pub fn term(&self) -> BondFilterTerm {
        match self {
            Self::InvalidSize { .. } => BondFilterTerm::Size,
            Self::InvalidMaturity { .. } => BondFilterTerm::Maturity,
        }
    }

    /// Offending value after newline stripping.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidSize { value } | Self::InvalidMaturity { value } => value.as_str(),
        }
    }

    /// Description of the expected format.
    #[must_use]
    pub fn expected(&self) -> &'static str {
        match self {
            Self::InvalidSize { .. } => "base-10 integer",
            Self::InvalidMaturity { .. } => MATURITY_FORMAT_HINT,
        }
    }
}

/// Parsed conjunction of equality filters.
///
/// An empty filter selects every bond. When a term is supplied more than once
/// the last value wins.
///
/// # Examples
/// ```
/// use bonds_backend::domain::{BondFilter, BondFilterTerm};
///
/// let filter = BondFilter::parse([(BondFilterTerm::Currency, "EUR\n")]).expect("valid");
/// assert_eq!(filter.currency(), Some("EUR"));
/// assert!(BondFilter::parse([(BondFilterTerm::Size, "100000a")]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BondFilter {
    isin: Option<String>,
    size: Option<i64>,
    currency: Option<String>,
    maturity: Option<NaiveDate>,
    lei: Option<String>,
    legal_name: Option<String>,
}

impl BondFilter {
    /// Parse raw `(term, value)` pairs.
    pub fn parse<I, V>(terms: I) -> Result<Self, BondFilterError>
    where
        I: IntoIterator<Item = (BondFilterTerm, V)>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();
        for (term, raw) in terms {
            let value = strip_newlines(raw.as_ref());
            match term {
                BondFilterTerm::Isin => filter.isin = Some(value.to_owned()),
                BondFilterTerm::Size => filter.size = Some(parse_size(value)?),
                BondFilterTerm::Currency => filter.currency = Some(value.to_owned()),
                BondFilterTerm::Maturity => filter.maturity = Some(parse_maturity(value)?),
                BondFilterTerm::Lei => filter.lei = Some(value.to_owned()),
                BondFilterTerm::LegalName => filter.legal_name = Some(value.to_owned()),
            }
        }
        Ok(filter)
    }

    /// Whether no term was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Check every supplied term against `bond`.
    #[must_use]
    pub fn matches(&self, bond: &Bond) -> bool {
        text_matches(self.isin.as_deref(), bond.isin())
            && self.size.is_none_or(|size| size == bond.size())
            && text_matches(self.currency.as_deref(), bond.currency())
            && self.maturity.is_none_or(|date| date == bond.maturity())
            && text_matches(self.lei.as_deref(), bond.lei().as_str())
            && text_matches(self.legal_name.as_deref(), bond.legal_name())
    }

    /// Required ISIN, if filtered.
    #[must_use]
    pub fn isin(&self) -> Option<&str> {
        self.isin.as_deref()
    }

    /// Required size, if filtered.
    #[must_use]
    pub fn size(&self) -> Option<i64> {
        self.size
    }

    /// Required currency, if filtered.
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Required maturity, if filtered.
    #[must_use]
    pub fn maturity(&self) -> Option<NaiveDate> {
        self.maturity
    }

    /// Required LEI, if filtered.
    #[must_use]
    pub fn lei(&self) -> Option<&str> {
        self.lei.as_deref()
    }

    /// Required legal name, if filtered.
    #[must_use]
    pub fn legal_name(&self) -> Option<&str> {
        self.legal_name.as_deref()
    }
}

fn strip_newlines(raw: &str) -> &str {
    raw.trim_matches(|c| c == '\n' || c == '\r')
}

fn text_matches(expected: Option<&str>, actual: &str) -> bool {
    expected.is_none_or(|value| value == actual)
}

fn parse_size(value: &str) -> Result<i64, BondFilterError> {
    // `i64::from_str` accepts a leading `+`, which is still base-10.
    value.parse().map_err(|_| BondFilterError::InvalidSize {
        value: value.to_owned(),
    })
}

fn parse_maturity(value: &str) -> Result<NaiveDate, BondFilterError> {
    let invalid = || BondFilterError::InvalidMaturity {
        value: value.to_owned(),
    };
    // chrono tolerates unpadded fields; require the canonical ten characters.
    if value.len() != MATURITY_FORMAT_HINT.len() {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, MATURITY_FORMAT).map_err(|_| invalid())
}
