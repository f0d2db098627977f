//! Backend entry-point: loads settings, prepares storage and serves the
//! snippet board.

mod server;

use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppSettings, ServerConfig, create_server};
use snippets::inbound::http::SessionCookie;
use snippets::inbound::http::session_config::fingerprint::key_fingerprint;
use snippets::inbound::http::session_config::{BuildMode, session_settings_from_env};
use snippets::outbound::persistence::{DbPool, PoolConfig, run_migrations};

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

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

    let settings =
        AppSettings::load().map_err(|err| startup_error("failed to load settings", err))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|err| startup_error("invalid session configuration", err))?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        source = ?session.key_source,
        cookie = %session.cookie_name,
        "session key loaded"
    );

    let bind_addr = settings
        .bind_addr()
        .map_err(|err| startup_error("invalid settings", err))?;
    let mode = settings
        .error_page_mode()
        .map_err(|err| startup_error("invalid settings", err))?;
    let hasher = settings
        .password_hasher()
        .map_err(|err| startup_error("invalid settings", err))?;

    let mut config = ServerConfig::new(SessionCookie::from(&session), bind_addr)
        .with_base_path(settings.base_path())
        .with_error_pages(mode)
        .with_password_hasher(hasher);

    if let Some(url) = settings.database_url() {
        let applied = run_migrations(url)
            .await
            .map_err(|err| startup_error("database migration failed", err))?;
        info!(applied, "database schema up to date");
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(|err| startup_error("database pool creation failed", err))?;
        config = config.with_db_pool(pool);
    }

    info!(%bind_addr, ?mode, "starting server");
    create_server(config)?.await
}
