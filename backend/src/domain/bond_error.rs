//! Failure taxonomy for bond intake and search.
//!
//! Services raise [`BondError`] and convert it into the transport-agnostic
//! [`Error`] at the driving-port boundary.

use serde_json::json;

use super::ports::{BondRepositoryError, LegalEntityRegistryError};
use super::{BondFilterError, Error, LeiValidationError};

/// Message returned when a submitted LEI is malformed.
pub const INVALID_LEI_MESSAGE: &str = "LEI code is invalid";
/// Message returned when the registry has no entity for a LEI.
pub const LEI_NOT_FOUND_MESSAGE: &str = "Could not find entity for the given LEI code";
/// Message returned when the registry cannot be reached.
pub const REGISTRY_UNAVAILABLE_MESSAGE: &str = "Error obtaining legal name from GLEIF API";

/// Reasons a bond operation can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BondError {
    /// The LEI is not twenty ASCII letters or digits. No lookup was made.
    #[error("LEI code is invalid")]
    InvalidIdentifier(#[source] LeiValidationError),
    /// The registry answered with no matching entity.
    #[error("Could not find entity for the given LEI code")]
    IdentifierNotFound {
        /// LEI that was looked up.
        lei: String,
    },
    /// The registry failed at the transport or protocol level.
    #[error("Error obtaining legal name from GLEIF API")]
    RegistryUnavailable(#[source] LegalEntityRegistryError),
    /// A search term did not parse as its field's type.
    #[error(transparent)]
    InvalidFilterValue(#[from] BondFilterError),
    /// The bond store failed.
    #[error(transparent)]
    Persistence(#[from] BondRepositoryError),
}

impl From<BondError> for Error {
    fn from(value: BondError) -> Self {
        match value {
            BondError::InvalidIdentifier(reason) => Error::invalid_request(INVALID_LEI_MESSAGE)
                .with_details(json!({
                    "field": "lei",
                    "code": "invalid_identifier",
                    "reason": reason.to_string(),
                })),
            BondError::IdentifierNotFound { lei } => {
                Error::not_found(LEI_NOT_FOUND_MESSAGE).with_details(json!({
                    "field": "lei",
                    "value": lei,
                    "code": "identifier_not_found",
                }))
            }
            BondError::RegistryUnavailable(_) => {
                Error::upstream_unavailable(REGISTRY_UNAVAILABLE_MESSAGE)
            }
            BondError::InvalidFilterValue(err) => Error::invalid_request(err.to_string())
                .with_details(json!({
                    "field": err.term().as_str(),
                    "value": err.value(),
                    "expected": err.expected(),
                    "code": "invalid_filter_value",
                })),
            BondError::Persistence(BondRepositoryError::Connection { message }) => {
                Error::service_unavailable(format!("bond repository unavailable: {message}"))
            }
            BondError::Persistence(BondRepositoryError::Query { message }) => {
                Error::internal(format!("bond repository error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(
        BondError::InvalidIdentifier(LeiValidationError::InvalidLength { actual: 3 }),
        ErrorCode::InvalidRequest,
        INVALID_LEI_MESSAGE
    )]
    #[case(
        BondError::IdentifierNotFound { lei: "00000000000000000000".into() },
        ErrorCode::NotFound,
        LEI_NOT_FOUND_MESSAGE
    )]
    #[case(
        BondError::RegistryUnavailable(LegalEntityRegistryError::timeout("30s elapsed")),
        ErrorCode::UpstreamUnavailable,
        REGISTRY_UNAVAILABLE_MESSAGE
    )]
    #[case(
        BondError::InvalidFilterValue(BondFilterError::InvalidSize { value: "100000a".into() }),
        ErrorCode::InvalidRequest,
        "size must be a base-10 integer"
    )]
    fn maps_to_domain_error(
        #[case] error: BondError,
        #[case] code: ErrorCode,
        #[case] message: &str,
    ) {
        let mapped = Error::from(error);
        assert_eq!(mapped.code(), code);
        assert_eq!(mapped.message(), message);
    }

    #[rstest]
    fn filter_errors_name_the_term_in_details() {
        let mapped = Error::from(BondError::from(BondFilterError::InvalidMaturity {
            value: "2025-02-28a".into(),
        }));
        let details = mapped.details().expect("details present");
        assert_eq!(details["field"], "maturity");
        assert_eq!(details["expected"], "YYYY-MM-DD");
        assert_eq!(details["code"], "invalid_filter_value");
        assert!(mapped.message().contains("YYYY-MM-DD"));
    }

    #[rstest]
    #[case(BondRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(BondRepositoryError::query("syntax"), ErrorCode::InternalError)]
    fn persistence_failures_split_by_kind(
        #[case] error: BondRepositoryError,
        #[case] code: ErrorCode,
    ) {
        assert_eq!(Error::from(BondError::from(error)).code(), code);
    }

    #[rstest]
    fn registry_reason_is_not_leaked_to_clients() {
        let mapped = Error::from(BondError::RegistryUnavailable(
            LegalEntityRegistryError::transport("dns failure for internal-host"),
        ));
        assert!(mapped.details().is_none());
        assert!(!mapped.message().contains("internal-host"));
    }
}
