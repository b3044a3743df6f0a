//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: bond intake and search, registration, login, health probes
//! - **Schemas**: request/response bodies plus the [`ErrorSchema`] and
//!   [`ErrorCodeSchema`] wrappers for domain error types
//! - **Security**: bearer token authentication scheme
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::bonds::{BondResponse, CreateBondRequest, CreateBondResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{CredentialsRequest, LoginResponse, RegisterResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme referenced by protected paths.
pub const BEARER_SCHEME: &str = "bearer";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Token issued by POST /api/v1/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bonds backend API",
        description = "Owner-scoped bond records enriched with GLEIF legal names."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::bonds::create_bond,
        crate::inbound::http::bonds::list_bonds,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateBondRequest,
        CreateBondResponse,
        BondResponse,
        CredentialsRequest,
        RegisterResponse,
        LoginResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "bonds", description = "Bond intake and search"),
        (name = "users", description = "Registration and login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
