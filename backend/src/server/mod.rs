//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::AppSettings;

use actix_web::HttpServer;
use actix_web::dev::Server;

use snippets::inbound::http::{AppDependencies, build_app};
use state_builders::build_http_state;

/// Construct an Actix HTTP server from `config`.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when templates fail to compile, or binding
/// the socket or starting the server fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = build_http_state(&config)?;
    let ServerConfig {
        cookie,
        bind_addr,
        mode,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            http_state: http_state.clone(),
            cookie: cookie.clone(),
            mode,
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
