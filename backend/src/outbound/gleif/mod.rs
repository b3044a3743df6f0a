//! GLEIF outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `LegalEntityRegistry` port against the GLEIF LEI lookup API.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_GLEIF_ENDPOINT, GleifHttpRegistry};
