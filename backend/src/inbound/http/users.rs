//! Account API handlers.
//!
//! ```text
//! POST /api/v1/register {"username":"trader","password":"s3cret"}
//! POST /api/v1/login {"username":"trader","password":"s3cret"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::Credentials;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::credentials_error;

/// Message returned after a successful registration.
pub const USER_CREATED_MESSAGE: &str = "User created successfully";

/// Credentials body shared by `POST /api/v1/register` and `POST /api/v1/login`.
///
/// Missing fields deserialise as blank so both are reported together.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct CredentialsRequest {
    #[schema(example = "trader")]
    pub username: String,
    #[schema(example = "s3cret")]
    pub password: String,
}

impl CredentialsRequest {
    fn validate(&self) -> ApiResult<Credentials> {
        Credentials::try_from_parts(&self.username, &self.password)
            .map_err(|err| credentials_error(&err))
    }
}

/// Body returned by `POST /api/v1/register`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "User created successfully")]
    pub message: String,
}

/// Body returned by `POST /api/v1/login`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    #[schema(example = "9f2c4e1d0b7a4c3e8f6a5b2d1c0e9f8a7b6c5d4e3f2a1b0c9d8e7f6a5b4c3d2e")]
    pub token: String,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 409, description = "Username taken", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = payload.validate()?;
    state.registration.register(&credentials).await?;
    Ok(HttpResponse::Created().json(RegisterResponse {
        message: USER_CREATED_MESSAGE.to_owned(),
    }))
}

/// Exchange credentials for a bearer token.
///
/// Every successful login issues a fresh token; earlier tokens stay valid.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = payload.validate()?;
    let token = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        token: token.expose().to_owned(),
    }))
}
