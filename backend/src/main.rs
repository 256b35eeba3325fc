//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use std::io;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bloglist::inbound::http::health::HealthState;
use bloglist::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use bloglist::outbound::token::JwtTokenService;
use ortho_config::OrthoConfig;
use server::{AppSettings, ServerConfig, SettingsError, create_server};

fn settings_error(err: SettingsError) -> io::Error {
    io::Error::other(err.to_string())
}

/// Turn loaded settings into a server configuration, connecting to
/// PostgreSQL when a database URL is present.
async fn build_server_config(settings: &AppSettings) -> io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(settings_error)?;
    let policy = settings.blog_policy().map_err(settings_error)?;
    let secret = settings.token_secret().map_err(settings_error)?;
    let tokens = JwtTokenService::new(&secret, settings.token_ttl());
    let config = ServerConfig::new(bind_addr, tokens, policy);

    let Some(database_url) = settings.database_url() else {
        return Ok(config);
    };
    run_migrations(database_url)
        .await
        .map_err(|err| io::Error::other(format!("database migration failed: {err}")))?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .map_err(|err| io::Error::other(format!("database pool setup failed: {err}")))?;
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))?;
    let config = build_server_config(&settings).await?;
    info!(bind_addr = %config.bind_addr, policy = ?config.policy, "starting server");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
