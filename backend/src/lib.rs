//! Bond record-keeping backend.
//!
//! Hexagonal layout: [`domain`] holds entities, services and ports;
//! [`inbound`] exposes them over HTTP; [`outbound`] implements the ports
//! against GLEIF, PostgreSQL and process memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
