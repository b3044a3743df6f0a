//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    MockBondCommand, MockBondQuery, MockLoginService, MockRegistrationService,
    MockTokenAuthenticator,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Token accepted by [`TestPorts::signed_in`].
pub const TEST_TOKEN: &str = "test-token";

/// Mock ports wired into [`HttpState`] for handler tests.
///
/// Mocks without expectations panic when called, so each test only sets up
/// the ports its handler should reach.
#[derive(Default)]
pub struct TestPorts {
    pub bonds: MockBondCommand,
    pub bonds_query: MockBondQuery,
    pub registration: MockRegistrationService,
    pub login: MockLoginService,
    pub tokens: MockTokenAuthenticator,
}

impl TestPorts {
    /// Resolve `token` to `user`; other tokens are rejected.
    pub fn authenticating(mut self, token: &'static str, user: UserId) -> Self {
        self.tokens
            .expect_authenticate()
            .returning(move |presented| {
                if presented.expose() == token {
                    Ok(user)
                } else {
                    Err(Error::unauthorized("invalid or expired access token"))
                }
            });
        self
    }

    /// Resolve [`TEST_TOKEN`] to `user`.
    pub fn signed_in(self, user: UserId) -> Self {
        self.authenticating(TEST_TOKEN, user)
    }

    /// Reject every presented token.
    pub fn rejecting_tokens(mut self) -> Self {
        self.tokens
            .expect_authenticate()
            .returning(|_| Err(Error::unauthorized("invalid or expired access token")));
        self
    }

    /// Finish into handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            bonds: Arc::new(self.bonds),
            bonds_query: Arc::new(self.bonds_query),
            registration: Arc::new(self.registration),
            login: Arc::new(self.login),
            tokens: Arc::new(self.tokens),
        }))
    }
}

/// `Authorization` header carrying [`TEST_TOKEN`].
pub fn bearer_header() -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {TEST_TOKEN}"),
    )
}
