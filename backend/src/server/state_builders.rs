//! Builders for HTTP state ports backed by PostgreSQL or process memory.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use snippets::domain::ports::{PasswordHasher, SnippetRepository, UserRepository};
use snippets::domain::{AccountService, SnippetService};
use snippets::inbound::http::{HttpState, HttpStatePorts, Views};
use snippets::outbound::memory::{InMemorySnippetRepository, InMemoryUserRepository};
use snippets::outbound::persistence::{DieselSnippetRepository, DieselUserRepository};

use super::ServerConfig;

fn ports_over<U, S, H>(users: U, snippets: S, hasher: H) -> HttpStatePorts
where
    U: UserRepository + 'static,
    S: SnippetRepository + 'static,
    H: PasswordHasher + 'static,
{
    let accounts = Arc::new(AccountService::new(Arc::new(users), Arc::new(hasher)));
    let snippets = Arc::new(SnippetService::new(
        Arc::new(snippets),
        Arc::new(DefaultClock),
    ));
    HttpStatePorts {
        login: accounts.clone(),
        registration: accounts,
        snippets_query: snippets.clone(),
        snippets_command: snippets,
    }
}

fn build_ports(config: &ServerConfig) -> HttpStatePorts {
    match &config.db_pool {
        Some(pool) => ports_over(
            DieselUserRepository::new(pool.clone()),
            DieselSnippetRepository::new(pool.clone()),
            config.hasher,
        ),
        None => {
            warn!("no database configured; accounts and snippets are kept in memory");
            ports_over(
                InMemoryUserRepository::default(),
                InMemorySnippetRepository::default(),
                config.hasher,
            )
        }
    }
}

/// Assemble handler state shared by every worker.
///
/// # Errors
/// Returns [`std::io::Error`] when a bundled template fails to compile.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let views = Views::new()
        .map_err(|err| std::io::Error::other(format!("template compilation failed: {err}")))?;
    Ok(web::Data::new(HttpState::new(
        build_ports(config),
        Arc::new(views),
        config.base.clone(),
    )))
}
