//! REST route table.
//!
//! The server binary and the integration tests mount the same scope so both
//! see identical paths, extractor configuration and error shapes.

use actix_web::{Scope, web};

use crate::inbound::http::bonds::{create_bond, list_bonds};
use crate::inbound::http::error::{json_config, query_config};
use crate::inbound::http::users::{login, register};

/// Versioned API prefix.
pub const API_PREFIX: &str = "/api/v1";

/// Build the `/api/v1` scope with every REST handler.
///
/// Handlers expect `web::Data<HttpState>` to be registered on the app.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bonds_backend::inbound::http::routes::api_scope;
///
/// let _app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope(API_PREFIX)
        .app_data(json_config())
        .app_data(query_config())
        .service(register)
        .service(login)
        .service(create_bond)
        .service(list_bonds)
}
