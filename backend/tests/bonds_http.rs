//! End-to-end coverage of registration, login, bond intake and bond search.
//!
//! The full route table runs against in-memory stores and a deterministic
//! legal-entity registry, so no network or database is required.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use bonds_backend::Trace;
use bonds_backend::domain::ports::{FixtureLegalEntityRegistry, LegalEntityRegistryError};
use bonds_backend::domain::{AccountService, BondService, TRACE_ID_HEADER};
use bonds_backend::inbound::http::routes::api_scope;
use bonds_backend::inbound::http::state::{HttpState, HttpStatePorts};
use bonds_backend::outbound::memory::{
    InMemoryAccessTokenRepository, InMemoryBondRepository, InMemoryUserAccountRepository,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const BNP_LEI: &str = "R0MUWSFPU8MPRO8K5P83";
const BNP_NAME: &str = "BNP PARIBAS";
const UNKNOWN_LEI: &str = "5493001KJTIIGC8Y1R12";

#[fixture]
fn registry() -> FixtureLegalEntityRegistry {
    FixtureLegalEntityRegistry::default().with_entity(BNP_LEI, BNP_NAME)
}

fn state_with(registry: FixtureLegalEntityRegistry) -> web::Data<HttpState> {
    let bonds = Arc::new(BondService::new(
        Arc::new(InMemoryBondRepository::default()),
        Arc::new(registry),
        Arc::new(DefaultClock),
    ));
    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserAccountRepository::default()),
        Arc::new(InMemoryAccessTokenRepository::default()),
        Arc::new(DefaultClock),
    ));
    web::Data::new(HttpState::new(HttpStatePorts {
        bonds: bonds.clone(),
        bonds_query: bonds,
        registration: accounts.clone(),
        login: accounts.clone(),
        tokens: accounts,
    }))
}

async fn app_with(
    registry: FixtureLegalEntityRegistry,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(state_with(registry))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await
}

async fn send<S>(app: &S, req: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = actix_test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body = actix_test::read_body(res).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn sign_up<S>(app: &S, username: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let credentials = json!({"username": username, "password": "s3cret"});
    let (status, _) = send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(&credentials),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&credentials),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token issued").to_owned()
}

fn bond(lei: &str, currency: &str) -> Value {
    json!({
        "isin": "FR0000131104",
        "size": 100_000,
        "currency": currency,
        "maturity": "2025-02-28",
        "lei": lei,
    })
}

async fn create<S>(app: &S, token: &str, body: &Value) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/bonds")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .set_json(body),
    )
    .await
}

async fn list<S>(app: &S, token: &str, query: &str) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(
        app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/bonds{query}"))
            .insert_header((AUTHORIZATION, format!("Bearer {token}"))),
    )
    .await
}

#[rstest]
#[actix_web::test]
async fn created_bond_carries_registry_legal_name(registry: FixtureLegalEntityRegistry) {
    let app = app_with(registry).await;
    let token = sign_up(&app, "alice").await;

    let (status, body) = create(&app, &token, &bond(BNP_LEI, "EUR")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Bond successfully created.");
    assert_eq!(body["bond"]["legal_name"], BNP_NAME);
    assert_eq!(body["bond"]["maturity"], "2025-02-28");
}

#[rstest]
#[actix_web::test]
async fn bonds_are_scoped_to_their_owner(registry: FixtureLegalEntityRegistry) {
    let app = app_with(registry).await;
    let alice = sign_up(&app, "alice").await;
    let bob = sign_up(&app, "bob").await;
    create(&app, &alice, &bond(BNP_LEI, "EUR")).await;

    let (_, mine) = list(&app, &alice, "").await;
    let (status, theirs) = list(&app, &bob, "").await;

    assert_eq!(mine.as_array().map(Vec::len), Some(1));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(theirs, json!([]));
}

#[rstest]
#[actix_web::test]
async fn filters_combine_with_and(registry: FixtureLegalEntityRegistry) {
    let app = app_with(registry).await;
    let token = sign_up(&app, "alice").await;
    create(&app, &token, &bond(BNP_LEI, "EUR")).await;
    create(&app, &token, &bond(BNP_LEI, "USD")).await;

    let (_, eur) = list(&app, &token, "?currency=EUR").await;
    let (_, conflicting) = list(&app, &token, "?currency=EUR&size=5").await;
    let (_, named) = list(&app, &token, "?legal_name=BNP%20PARIBAS&maturity=2025-02-28").await;

    let eur = eur.as_array().expect("array");
    assert_eq!(eur.len(), 1);
    assert_eq!(eur[0]["currency"], "EUR");
    assert_eq!(conflicting, json!([]));
    let named = named.as_array().expect("array");
    assert_eq!(named.len(), 2);
    assert_eq!(named[0]["currency"], "EUR");
    assert_eq!(named[1]["currency"], "USD");
}

#[rstest]
#[case("?size=100000a", "size")]
#[case("?maturity=2025-02-28a", "YYYY-MM-DD")]
#[actix_web::test]
async fn malformed_filters_name_the_problem(
    registry: FixtureLegalEntityRegistry,
    #[case] query: &str,
    #[case] expected_fragment: &str,
) {
    let app = app_with(registry).await;
    let token = sign_up(&app, "alice").await;

    let (status, body) = list(&app, &token, query).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().expect("message");
    assert!(message.contains(expected_fragment), "{message}");
}

#[rstest]
#[actix_web::test]
async fn identical_submissions_create_two_records(registry: FixtureLegalEntityRegistry) {
    let app = app_with(registry).await;
    let token = sign_up(&app, "alice").await;
    let payload = bond(BNP_LEI, "EUR");

    create(&app, &token, &payload).await;
    create(&app, &token, &payload).await;
    let (_, all) = list(&app, &token, "").await;

    assert_eq!(all.as_array().map(Vec::len), Some(2));
}

#[rstest]
#[case("R0MUWSFPU8MPRO8K5P8", StatusCode::BAD_REQUEST, "LEI code is invalid")]
#[case("R0MUWSFPU8MPRO8K5P8!", StatusCode::BAD_REQUEST, "LEI code is invalid")]
#[case(
    UNKNOWN_LEI,
    StatusCode::NOT_FOUND,
    "Could not find entity for the given LEI code"
)]
#[actix_web::test]
async fn intake_failures_store_nothing(
    registry: FixtureLegalEntityRegistry,
    #[case] lei: &str,
    #[case] expected_status: StatusCode,
    #[case] expected_message: &str,
) {
    let app = app_with(registry).await;
    let token = sign_up(&app, "alice").await;

    let (status, body) = create(&app, &token, &bond(lei, "EUR")).await;
    let (_, all) = list(&app, &token, "").await;

    assert_eq!(status, expected_status);
    assert_eq!(body["message"], expected_message);
    assert_eq!(all, json!([]));
}

#[actix_web::test]
async fn registry_outage_is_a_server_error() {
    let registry = FixtureLegalEntityRegistry::default()
        .failing_with(LegalEntityRegistryError::timeout("30s elapsed"));
    let app = app_with(registry).await;
    let token = sign_up(&app, "alice").await;

    let (status, body) = create(&app, &token, &bond(BNP_LEI, "EUR")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error obtaining legal name from GLEIF API");
    assert_eq!(body["code"], "upstream_unavailable");
}

#[rstest]
#[case(None)]
#[case(Some("Bearer not-a-real-token"))]
#[actix_web::test]
async fn bond_endpoints_reject_anonymous_callers(
    registry: FixtureLegalEntityRegistry,
    #[case] header: Option<&str>,
) {
    let app = app_with(registry).await;
    let mut req = actix_test::TestRequest::get().uri("/api/v1/bonds");
    if let Some(value) = header {
        req = req.insert_header((AUTHORIZATION, value));
    }

    let res = actix_test::call_service(&app, req.to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
}

#[rstest]
#[actix_web::test]
async fn duplicate_usernames_conflict(registry: FixtureLegalEntityRegistry) {
    let app = app_with(registry).await;
    sign_up(&app, "alice").await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(json!({"username": "alice", "password": "other"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        "Username already exists, please provide another."
    );
}

#[rstest]
#[actix_web::test]
async fn blank_registration_lists_required_fields(registry: FixtureLegalEntityRegistry) {
    let app = app_with(registry).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(json!({"username": "", "password": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"],
        json!({"username": "required", "password": "required"})
    );
}

#[rstest]
#[actix_web::test]
async fn wrong_password_is_unauthorised(registry: FixtureLegalEntityRegistry) {
    let app = app_with(registry).await;
    sign_up(&app, "alice").await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"username": "alice", "password": "wrong"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid credentials");
}
