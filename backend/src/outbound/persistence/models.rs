//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{access_tokens, bonds, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for recording issued tokens.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = access_tokens)]
pub(crate) struct NewAccessTokenRow<'a> {
    pub fingerprint: &'a str,
    pub user_id: Uuid,
    pub issued_at: DateTime<Utc>,
}

/// Row struct for reading from the bonds table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bonds)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BondRow {
    pub id: i64,
    pub owner_id: Uuid,
    pub isin: String,
    pub size: i64,
    pub currency: String,
    pub maturity: NaiveDate,
    pub lei: String,
    pub legal_name: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for appending bonds; `id` comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bonds)]
pub(crate) struct NewBondRow<'a> {
    pub owner_id: Uuid,
    pub isin: &'a str,
    pub size: i64,
    pub currency: &'a str,
    pub maturity: NaiveDate,
    pub lei: &'a str,
    pub legal_name: &'a str,
    pub created_at: DateTime<Utc>,
}
