//! PostgreSQL-backed `BondRepository` implementation using Diesel ORM.
//!
//! Filters compose onto a boxed query, so only supplied terms become `WHERE`
//! clauses. Rows come back ordered by the `bigserial` id.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BondRepository, BondRepositoryError};
use crate::domain::{Bond, BondFilter, BondId, Lei, NewBond, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BondRow, NewBondRow};
use super::pool::{DbPool, PoolError};
use super::schema::bonds;

/// Diesel-backed implementation of the bond repository port.
#[derive(Clone)]
pub struct DieselBondRepository {
    pool: DbPool,
}

impl DieselBondRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BondRepositoryError {
    map_basic_pool_error(error, BondRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BondRepositoryError {
    map_basic_diesel_error(
        error,
        BondRepositoryError::query,
        BondRepositoryError::connection,
    )
}

fn row_to_bond(row: BondRow) -> Result<Bond, BondRepositoryError> {
    let BondRow {
        id,
        owner_id,
        isin,
        size,
        currency,
        maturity,
        lei,
        legal_name,
        created_at,
    } = row;
    let lei = Lei::new(lei)
        .map_err(|err| BondRepositoryError::query(format!("stored bond {id}: {err}")))?;

    Ok(Bond::new(
        BondId::new(id),
        NewBond {
            owner: UserId::from_uuid(owner_id),
            isin,
            size,
            currency,
            maturity,
            lei,
            legal_name,
            created_at,
        },
    ))
}

#[async_trait]
impl BondRepository for DieselBondRepository {
    async fn insert(&self, bond: &NewBond) -> Result<Bond, BondRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewBondRow {
            owner_id: *bond.owner.as_uuid(),
            isin: bond.isin.as_str(),
            size: bond.size,
            currency: bond.currency.as_str(),
            maturity: bond.maturity,
            lei: bond.lei.as_str(),
            legal_name: bond.legal_name.as_str(),
            created_at: bond.created_at,
        };

        let row = diesel::insert_into(bonds::table)
            .values(&new_row)
            .returning(BondRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_bond(row)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: &BondFilter,
    ) -> Result<Vec<Bond>, BondRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = bonds::table
            .filter(bonds::owner_id.eq(*owner.as_uuid()))
            .order(bonds::id.asc())
            .select(BondRow::as_select())
            .into_boxed();
        if let Some(isin) = filter.isin() {
            query = query.filter(bonds::isin.eq(isin));
        }
        if let Some(size) = filter.size() {
            query = query.filter(bonds::size.eq(size));
        }
        if let Some(currency) = filter.currency() {
            query = query.filter(bonds::currency.eq(currency));
        }
        if let Some(maturity) = filter.maturity() {
            query = query.filter(bonds::maturity.eq(maturity));
        }
        if let Some(lei) = filter.lei() {
            query = query.filter(bonds::lei.eq(lei));
        }
        if let Some(legal_name) = filter.legal_name() {
            query = query.filter(bonds::legal_name.eq(legal_name));
        }

        let rows: Vec<BondRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_bond).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row decoding.
    use super::*;
    use chrono::{DateTime, NaiveDate, Utc};
    use rstest::rstest;
    use uuid::Uuid;

    fn row(lei: &str) -> BondRow {
        BondRow {
            id: 3,
            owner_id: Uuid::new_v4(),
            isin: "FR0000131104".into(),
            size: 100_000,
            currency: "EUR".into(),
            maturity: NaiveDate::from_ymd_opt(2025, 2, 28).expect("valid date"),
            lei: lei.into(),
            legal_name: "BNP PARIBAS".into(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[rstest]
    fn decodes_rows_into_bonds() {
        let bond = row_to_bond(row("R0MUWSFPU8MPRO8K5P83")).expect("valid row");
        assert_eq!(bond.id().get(), 3);
        assert_eq!(bond.legal_name(), "BNP PARIBAS");
    }

    #[rstest]
    fn corrupt_lei_is_a_query_error() {
        let err = row_to_bond(row("short")).expect_err("corrupt row");
        assert!(matches!(err, BondRepositoryError::Query { .. }));
    }
}
