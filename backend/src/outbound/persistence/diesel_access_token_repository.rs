//! PostgreSQL-backed `AccessTokenRepository` implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    AccessTokenRepository, AccessTokenRepositoryError, MAX_TOKENS_PER_USER,
};
use crate::domain::{TokenFingerprint, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewAccessTokenRow;
use super::pool::{DbPool, PoolError};
use super::schema::access_tokens;

/// Diesel-backed implementation of the token repository port.
#[derive(Clone)]
pub struct DieselAccessTokenRepository {
    pool: DbPool,
}

impl DieselAccessTokenRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccessTokenRepositoryError {
    map_basic_pool_error(error, AccessTokenRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AccessTokenRepositoryError {
    map_basic_diesel_error(
        error,
        AccessTokenRepositoryError::query,
        AccessTokenRepositoryError::connection,
    )
}

fn token_cap() -> i64 {
    i64::try_from(MAX_TOKENS_PER_USER).unwrap_or(i64::MAX)
}

#[async_trait]
impl AccessTokenRepository for DieselAccessTokenRepository {
    async fn store(
        &self,
        fingerprint: &TokenFingerprint,
        user_id: &UserId,
        issued_at: DateTime<Utc>,
    ) -> Result<(), AccessTokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewAccessTokenRow {
            fingerprint: fingerprint.as_str(),
            user_id: *user_id.as_uuid(),
            issued_at,
        };
        diesel::insert_into(access_tokens::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let retained: Vec<String> = access_tokens::table
            .filter(access_tokens::user_id.eq(new_row.user_id))
            .order((
                access_tokens::issued_at.desc(),
                access_tokens::fingerprint.desc(),
            ))
            .select(access_tokens::fingerprint)
            .limit(token_cap())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        diesel::delete(
            access_tokens::table
                .filter(access_tokens::user_id.eq(new_row.user_id))
                .filter(access_tokens::fingerprint.ne(fingerprint.as_str()))
                .filter(access_tokens::fingerprint.ne_all(retained)),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn resolve(
        &self,
        fingerprint: &TokenFingerprint,
    ) -> Result<Option<UserId>, AccessTokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_id: Option<Uuid> = access_tokens::table
            .filter(access_tokens::fingerprint.eq(fingerprint.as_str()))
            .select(access_tokens::user_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(user_id.map(UserId::from_uuid))
    }
}
