//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the bond, account and token repository ports
//! backed by PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures map to the port error enums
//!   with SQL detail logged, not returned.
//!
//! # Example
//!
//! ```ignore
//! use bonds_backend::outbound::persistence::{DbPool, DieselBondRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bonds")).await?;
//! let repo = DieselBondRepository::new(pool);
//! ```

mod diesel_access_token_repository;
mod diesel_basic_error_mapping;
mod diesel_bond_repository;
mod diesel_user_account_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_access_token_repository::DieselAccessTokenRepository;
pub use diesel_bond_repository::DieselBondRepository;
pub use diesel_user_account_repository::DieselUserAccountRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
