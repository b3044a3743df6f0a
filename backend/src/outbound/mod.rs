//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **gleif**: reqwest client for the GLEIF LEI lookup API
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: mutex-guarded stores for runs without a database
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod gleif;
pub mod memory;
pub mod persistence;
