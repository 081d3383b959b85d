//! Job board entry-point: loads settings, prepares storage and token signing,
//! then serves the REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use jobboard::inbound::http::health::HealthState;
use jobboard::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations_async};
use jobboard::outbound::token::{BuildMode, key_fingerprint, token_settings_from_env};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(format!("invalid bind address: {err}")))?;

    let tokens = token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&tokens.key),
        ephemeral = tokens.ephemeral,
        ttl_secs = tokens.ttl.as_secs(),
        "token signing key loaded"
    );

    let mut config = ServerConfig::new(bind_addr, tokens);
    if let Some(database_url) = settings.database_url.clone() {
        if settings.run_migrations() {
            let applied = run_pending_migrations_async(database_url.clone())
                .await
                .map_err(std::io::Error::other)?;
            info!(applied, "database migrations applied");
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await
        .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
