//! Authentication primitives: credentials, password digests and access tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::user::{UserValidationError, Username};

const SALT_BYTES: usize = 16;
const TOKEN_BYTES: usize = 32;
const HASH_SCHEME: &str = "sha256";

/// Credential field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CredentialField {
    /// The `username` field.
    Username,
    /// The `password` field.
    Password,
}

impl CredentialField {
    /// Payload field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
        }
    }
}

/// Domain error returned when credential payload values are invalid.
///
/// Every missing field is reported at once so callers can list them together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsValidationError {
    missing: Vec<CredentialField>,
    username: Option<UserValidationError>,
}

impl CredentialsValidationError {
    /// Fields that were absent or blank.
    #[must_use]
    pub fn missing_fields(&self) -> &[CredentialField] {
        self.missing.as_slice()
    }

    /// Username rule violated by a present, non-blank username.
    #[must_use]
    pub fn username_error(&self) -> Option<&UserValidationError> {
        self.username.as_ref()
    }
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.missing.as_slice(), &self.username) {
            ([], Some(err)) => err.fmt(f),
            ([field], _) => write!(f, "{} is required", field.as_str()),
            _ => f.write_str("username and password are required"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated username/password pair used by registration and login.
///
/// ## Invariants
/// - `username` satisfies [`Username`] rules.
/// - `password` is non-empty but retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use bonds_backend::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" trader ", "hunter2").expect("valid");
/// assert_eq!(creds.username().as_str(), "trader");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let mut missing = Vec::new();
        if username.trim().is_empty() {
            missing.push(CredentialField::Username);
        }
        if password.is_empty() {
            missing.push(CredentialField::Password);
        }
        if !missing.is_empty() {
            return Err(CredentialsValidationError {
                missing,
                username: None,
            });
        }

        let username = Username::new(username).map_err(|err| CredentialsValidationError {
            missing: Vec::new(),
            username: Some(err),
        })?;

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised username.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Error raised when a stored password digest cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hash is not in `sha256$<salt>$<digest>` form")]
pub struct PasswordHashFormatError;

/// Salted SHA-256 password digest, encoded as `sha256$<salt hex>$<digest hex>`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Derive a digest for `password` using a fresh random salt.
    #[must_use]
    pub fn derive(password: &str) -> Self {
        let mut salt = [0_u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::derive_with_salt(password, &salt)
    }

    fn derive_with_salt(password: &str, salt: &[u8]) -> Self {
        let digest = salted_digest(password, salt);
        Self(format!(
            "{HASH_SCHEME}${}${}",
            hex::encode(salt),
            hex::encode(digest)
        ))
    }

    /// Parse an encoded digest loaded from storage.
    pub fn parse(encoded: impl Into<String>) -> Result<Self, PasswordHashFormatError> {
        let encoded = encoded.into();
        split_encoded(&encoded).ok_or(PasswordHashFormatError)?;
        Ok(Self(encoded))
    }

    /// Check `password` against the stored digest.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        let Some((salt, expected)) = split_encoded(&self.0) else {
            return false;
        };
        let actual = salted_digest(password, &salt);
        constant_time_eq(&actual, &expected)
    }

    /// Encoded form suitable for persistence.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

fn salted_digest(password: &str, salt: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

fn split_encoded(encoded: &str) -> Option<(Vec<u8>, Vec<u8>)> {
    let mut parts = encoded.split('$');
    let scheme = parts.next()?;
    let salt = hex::decode(parts.next()?).ok()?;
    let digest = hex::decode(parts.next()?).ok()?;
    if scheme != HASH_SCHEME || parts.next().is_some() || salt.is_empty() || digest.len() != 32 {
        return None;
    }
    Some((salt, digest))
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Bearer token handed to a client after login.
///
/// Only the [`TokenFingerprint`] is persisted; the secret itself is shown to
/// the client once and zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Mint a new random token.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0_u8; TOKEN_BYTES]);
        rand::thread_rng().fill_bytes(bytes.as_mut_slice());
        Self(Zeroizing::new(hex::encode(bytes.as_slice())))
    }

    /// Wrap a token presented by a client. Returns `None` when blank.
    #[must_use]
    pub fn from_presented(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Token secret to return to the client.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Storage key derived from the secret.
    #[must_use]
    pub fn fingerprint(&self) -> TokenFingerprint {
        let digest = Sha256::digest(self.0.as_bytes());
        TokenFingerprint(hex::encode(digest))
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Hex-encoded SHA-256 of an [`AccessToken`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenFingerprint(String);

impl TokenFingerprint {
    /// Rehydrate a fingerprint read from storage.
    #[must_use]
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Hex text of the fingerprint.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
