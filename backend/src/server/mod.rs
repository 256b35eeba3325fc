//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::{AppSettings, SettingsError};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use bloglist::Trace;
#[cfg(debug_assertions)]
use bloglist::doc::ApiDoc;
use bloglist::inbound::http::configure_api;
use bloglist::inbound::http::health::{HealthState, live, ready};
use bloglist::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The readiness probe flips to ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use bloglist::domain::BlogPolicy;
    use bloglist::outbound::token::JwtTokenService;
    use serde_json::Value;

    fn memory_config() -> ServerConfig {
        ServerConfig::new(
            "127.0.0.1:0".parse().expect("addr"),
            JwtTokenService::new(b"server-test-secret", Duration::from_secs(60)),
            BlogPolicy::default(),
        )
    }

    #[actix_web::test]
    async fn app_serves_api_and_probes() {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        let http_state = web::Data::new(build_http_state(&memory_config()));
        let app = actix_test::init_service(build_app(health_state, http_state)).await;

        let blogs = actix_test::TestRequest::get().uri("/api/v1/blogs").to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, blogs).await;
        assert_eq!(body, Value::Array(Vec::new()));

        for uri in ["/health/ready", "/health/live"] {
            let req = actix_test::TestRequest::get().uri(uri).to_request();
            let res = actix_test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::OK, "{uri}");
        }
    }

    #[actix_web::test]
    async fn readiness_is_unavailable_until_marked() {
        let health_state = web::Data::new(HealthState::new());
        let http_state = web::Data::new(build_http_state(&memory_config()));
        let app = actix_test::init_service(build_app(health_state, http_state)).await;

        let req = actix_test::TestRequest::get().uri("/health/ready").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
