//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed bond and account entities plus the services
//! that implement the driving ports. Nothing here knows about HTTP, Diesel or
//! reqwest; adapters reach the domain only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Bond, Lei, BondFilter: bond records and owner-scoped search terms.
//! - BondService: intake and search over a store and a registry.
//! - AccountService: registration, login and bearer-token resolution.

pub mod account_service;
pub mod auth;
pub mod bond;
pub mod bond_error;
pub mod bond_filter;
pub mod bond_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountService, DUPLICATE_USERNAME_MESSAGE};
pub use self::auth::{
    AccessToken, CredentialField, Credentials, CredentialsValidationError, PasswordHash,
    PasswordHashFormatError, TokenFingerprint,
};
pub use self::bond::{
    Bond, BondId, BondSubmission, LEI_LENGTH, Lei, LeiValidationError, NewBond,
};
pub use self::bond_error::{
    BondError, INVALID_LEI_MESSAGE, LEI_NOT_FOUND_MESSAGE, REGISTRY_UNAVAILABLE_MESSAGE,
};
pub use self::bond_filter::{
    BondFilter, BondFilterError, BondFilterTerm, MATURITY_FORMAT, MATURITY_FORMAT_HINT,
    UnknownFilterTerm,
};
pub use self::bond_service::BondService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, UserAccount, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use bonds_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("missing bearer token"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
