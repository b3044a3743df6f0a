//! Bearer-token authentication for HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! header parsing and token resolution here. Handlers take an
//! [`AuthenticatedUser`] argument and receive the owner id directly.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AccessToken, Error, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Identity of the caller, resolved from an `Authorization: Bearer` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    /// Owner id of the authenticated caller.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

/// Pull the bearer token out of the request headers.
pub(crate) fn bearer_token(req: &HttpRequest) -> Result<AccessToken, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let raw = header
        .to_str()
        .map_err(|_| Error::unauthorized("authorization header is not valid ASCII"))?;
    let (scheme, token) = raw
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("authorization header must use the Bearer scheme"))?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(Error::unauthorized(
            "authorization header must use the Bearer scheme",
        ));
    }
    AccessToken::from_presented(token).ok_or_else(|| Error::unauthorized("missing bearer token"))
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let tokens = req
            .app_data::<web::Data<HttpState>>()
            .map(|state| state.tokens.clone());
        Box::pin(async move {
            let tokens =
                tokens.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let user_id = tokens.authenticate(&token?).await?;
            Ok(AuthenticatedUser(user_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::TestPorts;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};
    use rstest::rstest;

    const FIXTURE_USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id().to_string())
    }

    #[rstest]
    #[case("Bearer abc123")]
    #[case("bearer abc123")]
    #[case("Bearer   abc123  ")]
    #[actix_web::test]
    async fn resolves_bearer_token(#[case] header: &str) {
        let user = UserId::new(FIXTURE_USER).expect("fixture id");
        let state = TestPorts::default().authenticating("abc123", user).into_state();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .insert_header((AUTHORIZATION, header))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, FIXTURE_USER);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic dXNlcjpwYXNz"))]
    #[case(Some("Bearer"))]
    #[case(Some("Bearer    "))]
    #[actix_web::test]
    async fn malformed_headers_are_unauthorised(#[case] header: Option<&str>) {
        let state = TestPorts::default().into_state();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/whoami");
        if let Some(value) = header {
            req = req.insert_header((AUTHORIZATION, value));
        }
        let res = test::call_service(&app, req.to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn unknown_token_is_unauthorised() {
        let state = TestPorts::default().rejecting_tokens().into_state();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .insert_header((AUTHORIZATION, "Bearer stale"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
