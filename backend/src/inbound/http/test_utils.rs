//! Test helpers for inbound HTTP components.
//!
//! Builds the real services over the in-memory store so handler tests drive
//! the same code paths as the server without a database.

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use argon2::Params;
use serde_json::{Value, json};

use crate::Trace;
use crate::domain::{BlogPolicy, BlogService, UserService};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::outbound::hashing::Argon2CredentialHasher;
use crate::outbound::memory::InMemoryStore;
use crate::outbound::token::JwtTokenService;

pub const TEST_SECRET: &[u8] = b"handler-test-secret";

/// Argon2 hasher with the cheapest accepted parameters.
pub fn fast_hasher() -> Argon2CredentialHasher {
    match Params::new(1024, 1, 1, None) {
        Ok(params) => Argon2CredentialHasher::with_params(params),
        Err(err) => panic!("argon2 test params rejected: {err}"),
    }
}

/// Handler state wired over `store` with the given blog policy.
pub fn memory_state(store: &InMemoryStore, policy: BlogPolicy) -> HttpState {
    let store = Arc::new(store.clone());
    let tokens = Arc::new(JwtTokenService::new(
        TEST_SECRET,
        Duration::from_secs(3600),
    ));
    let blogs = BlogService::new(store.clone(), store.clone(), tokens.clone(), policy);
    let users = UserService::new(store, Arc::new(fast_hasher()), tokens);
    HttpState::from_services(Arc::new(blogs), Arc::new(users))
}

/// Application exposing the whole `/api/v1` surface over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
}

/// Register `username` and log in, returning the bearer token.
pub async fn register_and_login<S>(app: &S, username: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let register = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "username": username,
            "name": format!("{username} tester"),
            "password": "salainen",
        }))
        .to_request();
    let res = actix_test::call_service(app, register).await;
    assert!(res.status().is_success(), "registration failed: {}", res.status());

    let login = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": username, "password": "salainen" }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(app, login).await;
    body["token"]
        .as_str()
        .expect("login returns a token")
        .to_owned()
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {token}"),
    )
}
