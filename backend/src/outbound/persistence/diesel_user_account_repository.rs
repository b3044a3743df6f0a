//! PostgreSQL-backed `UserAccountRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserAccountRepository, UserAccountRepositoryError};
use crate::domain::{PasswordHash, UserAccount, UserId, Username};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the account repository port.
#[derive(Clone)]
pub struct DieselUserAccountRepository {
    pool: DbPool,
}

impl DieselUserAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserAccountRepositoryError {
    map_basic_pool_error(error, UserAccountRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserAccountRepositoryError {
    map_basic_diesel_error(
        error,
        UserAccountRepositoryError::query,
        UserAccountRepositoryError::connection,
    )
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserAccountRepositoryError> {
    let username = Username::new(&row.username)
        .map_err(|err| UserAccountRepositoryError::query(format!("stored user {}: {err}", row.id)))?;
    let password_hash = PasswordHash::parse(row.password_hash)
        .map_err(|err| UserAccountRepositoryError::query(format!("stored user {}: {err}", row.id)))?;
    Ok(UserAccount::new(
        UserId::from_uuid(row.id),
        username,
        password_hash,
        row.created_at,
    ))
}

#[async_trait]
impl UserAccountRepository for DieselUserAccountRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            id: *account.id().as_uuid(),
            username: account.username().as_str(),
            password_hash: account.password_hash().as_str(),
            created_at: account.created_at(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserAccountRepositoryError::duplicate_username(account.username().as_str())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }
}
