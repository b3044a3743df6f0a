//! In-process adapters used when no database URL is configured.
//!
//! Each store keeps its rows behind a `Mutex` and is safe to share across
//! actix workers through an `Arc`. Contents are lost on restart.

mod account_stores;
mod bond_store;

pub use account_stores::{InMemoryAccessTokenRepository, InMemoryUserAccountRepository};
pub use bond_store::InMemoryBondRepository;

fn poisoned<E>(what: &str) -> impl FnOnce(E) -> String + '_ {
    move |_| format!("{what} lock poisoned")
}
