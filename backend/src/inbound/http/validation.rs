//! Shared validation helpers for inbound HTTP adapters.

use chrono::NaiveDate;
use serde_json::{Map, Value, json};

use crate::domain::{
    CredentialsValidationError, Error, MATURITY_FORMAT, MATURITY_FORMAT_HINT,
    UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidDate,
    InvalidUsername,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidUsername => "invalid_username",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn invalid_date_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!(
        "{field} must be a date in {MATURITY_FORMAT_HINT} format"
    ))
    .with_details(json!({
        "field": field,
        "value": value,
        "expected": MATURITY_FORMAT_HINT,
        "code": ErrorCode::InvalidDate.as_str(),
    }))
}

/// Parse a calendar date written as `YYYY-MM-DD`.
pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, MATURITY_FORMAT)
        .map_err(|_| invalid_date_error(field, value))
}

/// Map credential validation failures to a `400` payload.
///
/// Blank fields are listed together as `{"<field>": "required"}`.
pub(crate) fn credentials_error(err: &CredentialsValidationError) -> Error {
    if !err.missing_fields().is_empty() {
        let details: Map<String, Value> = err
            .missing_fields()
            .iter()
            .map(|field| (field.as_str().to_owned(), Value::from("required")))
            .collect();
        return Error::invalid_request(err.to_string()).with_details(Value::Object(details));
    }

    let max = match err.username_error() {
        Some(UserValidationError::UsernameTooLong { max }) => Some(*max),
        _ => None,
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": "username",
        "code": ErrorCode::InvalidUsername.as_str(),
        "max": max,
    }))
}
