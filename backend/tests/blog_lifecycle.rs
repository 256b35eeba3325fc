//! End-to-end behaviour of the blog API over the in-memory store.
//!
//! Drives the public HTTP surface with the real services, JWT issuer and an
//! inexpensive Argon2 configuration: register, log in, publish, aggregate
//! and delete.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use argon2::Params;
use bloglist::Trace;
use bloglist::domain::ports::TokenIssuer;
use bloglist::domain::{
    BlogPolicy, BlogService, CredentialSecret, PersonName, UpdateAccess, User, UserId,
    UserService, Username,
};
use bloglist::inbound::http::configure_api;
use bloglist::inbound::http::state::HttpState;
use bloglist::outbound::hashing::Argon2CredentialHasher;
use bloglist::outbound::memory::InMemoryStore;
use bloglist::outbound::token::JwtTokenService;
use rstest::rstest;
use serde_json::{Value, json};

fn state(policy: BlogPolicy) -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    let tokens = Arc::new(JwtTokenService::new(
        b"lifecycle-secret",
        Duration::from_secs(600),
    ));
    let params = Params::new(1024, 1, 1, None).expect("argon2 params");
    let hasher = Arc::new(Argon2CredentialHasher::with_params(params));
    let blogs = BlogService::new(store.clone(), store.clone(), tokens.clone(), policy);
    let users = UserService::new(store, hasher, tokens);
    HttpState::from_services(Arc::new(blogs), Arc::new(users))
}

macro_rules! app {
    ($policy:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state($policy)))
                .wrap(Trace)
                .service(web::scope("/api/v1").configure(configure_api)),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr, $username:expr) => {{
        let register = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "username": $username, "name": "Integration", "password": "sekret" }))
            .to_request();
        let res = test::call_service(&$app, register).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let login = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": $username, "password": "sekret" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, login).await;
        format!("Bearer {}", body["token"].as_str().expect("token"))
    }};
}

macro_rules! publish {
    ($app:expr, $auth:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/blogs")
            .insert_header((header::AUTHORIZATION, $auth.clone()))
            .set_json($body)
            .to_request();
        let res = test::call_service(&$app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let blog: Value = test::read_body_json(res).await;
        blog["id"].as_str().expect("blog id").to_owned()
    }};
}

#[actix_web::test]
async fn full_blog_lifecycle() {
    let app = app!(BlogPolicy::default());
    let auth = login!(app, "hellas");

    let first = publish!(
        app,
        auth,
        json!({ "title": "React patterns", "author": "Michael Chan", "url": "https://reactpatterns.com/", "likes": 7 })
    );
    publish!(
        app,
        auth,
        json!({ "title": "Canonical string reduction", "author": "Edsger W. Dijkstra", "likes": 12 })
    );

    let list = test::TestRequest::get().uri("/api/v1/blogs").to_request();
    let blogs: Value = test::call_and_read_body_json(&app, list).await;
    assert_eq!(blogs.as_array().map(Vec::len), Some(2));
    assert_eq!(blogs[0]["user"]["username"], "hellas");

    let stats = test::TestRequest::get().uri("/api/v1/blogs/stats").to_request();
    let stats: Value = test::call_and_read_body_json(&app, stats).await;
    assert_eq!(stats["totalLikes"], 19);
    assert_eq!(stats["favoriteBlog"]["title"], "Canonical string reduction");
    assert_eq!(stats["mostBlogs"]["blogs"], 1);
    assert_eq!(stats["mostBlogs"]["author"], "Michael Chan");

    let delete = test::TestRequest::delete()
        .uri(&format!("/api/v1/blogs/{first}"))
        .insert_header((header::AUTHORIZATION, auth.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, delete).await.status(), StatusCode::NO_CONTENT);

    let users = test::TestRequest::get().uri("/api/v1/users").to_request();
    let users: Value = test::call_and_read_body_json(&app, users).await;
    assert_eq!(users[0]["blogs"].as_array().map(Vec::len), Some(1));

    let stats = test::TestRequest::get().uri("/api/v1/blogs/stats").to_request();
    let stats: Value = test::call_and_read_body_json(&app, stats).await;
    assert_eq!(stats["totalLikes"], 12);
}

#[rstest]
#[case(UpdateAccess::Unrestricted, StatusCode::OK)]
#[case(UpdateAccess::OwnerOnly, StatusCode::FORBIDDEN)]
#[actix_web::test]
async fn updates_by_other_users_follow_the_access_policy(
    #[case] update_access: UpdateAccess,
    #[case] expected: StatusCode,
) {
    let app = app!(BlogPolicy {
        update_access,
        ..BlogPolicy::default()
    });
    let owner = login!(app, "owner");
    let other = login!(app, "visitor");
    let id = publish!(
        app,
        owner,
        json!({ "title": "Type wars", "author": "Robert C. Martin", "likes": 2 })
    );

    let update = test::TestRequest::put()
        .uri(&format!("/api/v1/blogs/{id}"))
        .insert_header((header::AUTHORIZATION, other.clone()))
        .set_json(json!({ "title": "Type wars", "author": "Robert C. Martin", "likes": 3 }))
        .to_request();
    assert_eq!(test::call_service(&app, update).await.status(), expected);

    let delete = test::TestRequest::delete()
        .uri(&format!("/api/v1/blogs/{id}"))
        .insert_header((header::AUTHORIZATION, other))
        .to_request();
    assert_eq!(
        test::call_service(&app, delete).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn tokens_from_another_deployment_are_rejected() {
    let app = app!(BlogPolicy::default());
    let foreign = JwtTokenService::new(b"some-other-secret", Duration::from_secs(600));
    let ghost = User::new(
        UserId::random(),
        Username::new("ghost").expect("username"),
        PersonName::new("Ghost").expect("name"),
        CredentialSecret::new("unused"),
    );
    let token = foreign.issue(&ghost).await.expect("token issued");

    let req = test::TestRequest::post()
        .uri("/api/v1/blogs")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token.expose())))
        .set_json(json!({ "title": "Ghost", "author": "Nobody" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
