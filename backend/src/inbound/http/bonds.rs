//! Bonds API handlers.
//!
//! ```text
//! POST /api/v1/bonds {"isin":"FR0000131104","size":100000,"currency":"EUR","maturity":"2025-02-28","lei":"R0MUWSFPU8MPRO8K5P83"}
//! GET /api/v1/bonds?currency=EUR&legal_name=BNP%20PARIBAS
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Bond, BondFilterTerm, BondSubmission, Error, MATURITY_FORMAT};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date};

/// Confirmation message returned alongside a created bond.
pub const BOND_CREATED_MESSAGE: &str = "Bond successfully created.";

/// Request body for `POST /api/v1/bonds`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateBondRequest {
    #[schema(example = "FR0000131104")]
    pub isin: String,
    #[schema(example = 100000)]
    pub size: i64,
    #[schema(example = "EUR")]
    pub currency: String,
    /// Maturity date in `YYYY-MM-DD` form.
    #[schema(example = "2025-02-28")]
    pub maturity: String,
    #[schema(example = "R0MUWSFPU8MPRO8K5P83")]
    pub lei: String,
}

impl TryFrom<CreateBondRequest> for BondSubmission {
    type Error = Error;

    fn try_from(value: CreateBondRequest) -> Result<Self, Self::Error> {
        let maturity = parse_date(&value.maturity, FieldName::new("maturity"))?;
        Ok(Self {
            isin: value.isin,
            size: value.size,
            currency: value.currency,
            maturity,
            lei: value.lei,
        })
    }
}

/// Bond record as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct BondResponse {
    #[schema(example = "FR0000131104")]
    pub isin: String,
    #[schema(example = 100000)]
    pub size: i64,
    #[schema(example = "EUR")]
    pub currency: String,
    #[schema(example = "2025-02-28")]
    pub maturity: String,
    #[schema(example = "R0MUWSFPU8MPRO8K5P83")]
    pub lei: String,
    #[schema(example = "BNP PARIBAS")]
    pub legal_name: String,
}

impl From<&Bond> for BondResponse {
    fn from(bond: &Bond) -> Self {
        Self {
            isin: bond.isin().to_owned(),
            size: bond.size(),
            currency: bond.currency().to_owned(),
            maturity: bond.maturity().format(MATURITY_FORMAT).to_string(),
            lei: bond.lei().as_str().to_owned(),
            legal_name: bond.legal_name().to_owned(),
        }
    }
}

/// Response body for a successful `POST /api/v1/bonds`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateBondResponse {
    #[schema(example = "Bond successfully created.")]
    pub message: String,
    pub bond: BondResponse,
}

/// Query parameters accepted by `GET /api/v1/bonds`.
///
/// Every parameter is optional and all supplied parameters must match.
/// Unknown parameters are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[expect(
    dead_code,
    reason = "Documents the query string; handlers read raw pairs"
)]
pub struct BondListQuery {
    #[param(example = "FR0000131104")]
    isin: Option<String>,
    /// Base-10 integer.
    #[param(example = "100000")]
    size: Option<String>,
    #[param(example = "EUR")]
    currency: Option<String>,
    /// Date in `YYYY-MM-DD` form.
    #[param(example = "2025-02-28")]
    maturity: Option<String>,
    #[param(example = "R0MUWSFPU8MPRO8K5P83")]
    lei: Option<String>,
    #[param(example = "BNP PARIBAS")]
    legal_name: Option<String>,
}

fn recognised_terms(pairs: Vec<(String, String)>) -> Vec<(BondFilterTerm, String)> {
    pairs
        .into_iter()
        .filter_map(|(key, value)| match BondFilterTerm::from_str(&key) {
            Ok(term) => Some((term, value)),
            Err(err) => {
                debug!(error = %err, "ignoring query parameter");
                None
            }
        })
        .collect()
}

/// Record a bond for the authenticated user.
///
/// The LEI is checked for format, then resolved against the legal-entity
/// registry; the first match supplies `legal_name`.
#[utoipa::path(
    post,
    path = "/api/v1/bonds",
    request_body = CreateBondRequest,
    responses(
        (status = 201, description = "Bond created", body = CreateBondResponse),
        (status = 400, description = "Invalid request or LEI", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "LEI unknown to the registry", body = ErrorSchema),
        (status = 500, description = "Registry unavailable or internal error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["bonds"],
    operation_id = "createBond",
    security(("bearer" = []))
)]
#[post("/bonds")]
pub async fn create_bond(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateBondRequest>,
) -> ApiResult<HttpResponse> {
    let submission = BondSubmission::try_from(payload.into_inner())?;
    let bond = state.bonds.create_bond(user.user_id(), submission).await?;
    Ok(HttpResponse::Created().json(CreateBondResponse {
        message: BOND_CREATED_MESSAGE.to_owned(),
        bond: BondResponse::from(&bond),
    }))
}

/// List the authenticated user's bonds, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/bonds",
    params(BondListQuery),
    responses(
        (status = 200, description = "Matching bonds", body = [BondResponse]),
        (status = 400, description = "Malformed filter value", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["bonds"],
    operation_id = "listBonds",
    security(("bearer" = []))
)]
#[get("/bonds")]
pub async fn list_bonds(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<Vec<BondResponse>>> {
    let terms = recognised_terms(query.into_inner());
    let bonds = state.bonds_query.list_bonds(user.user_id(), terms).await?;
    Ok(web::Json(bonds.iter().map(BondResponse::from).collect()))
}

#[cfg(test)]
#[path = "bonds_tests.rs"]
mod tests;
