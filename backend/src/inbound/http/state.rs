//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use super::base_path::BasePath;
use super::views::Views;
use crate::domain::ports::{LoginService, RegistrationService, SnippetsCommand, SnippetsQuery};

/// Parameter object bundling the port implementations handlers call.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub snippets_query: Arc<dyn SnippetsQuery>,
    pub snippets_command: Arc<dyn SnippetsCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub snippets_query: Arc<dyn SnippetsQuery>,
    pub snippets_command: Arc<dyn SnippetsCommand>,
    pub views: Arc<Views>,
    pub base: BasePath,
}

impl HttpState {
    /// Construct state from the ports, the compiled views and the mount point.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use snippets::domain::{AccountService, SnippetService};
    /// use snippets::inbound::http::{BasePath, HttpState, HttpStatePorts, Views};
    /// use snippets::outbound::memory::{InMemorySnippetRepository, InMemoryUserRepository};
    /// use snippets::outbound::security::BcryptPasswordHasher;
    ///
    /// let accounts = Arc::new(AccountService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(BcryptPasswordHasher::default()),
    /// ));
    /// let snippets = Arc::new(SnippetService::new(
    ///     Arc::new(InMemorySnippetRepository::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         login: accounts.clone(),
    ///         registration: accounts,
    ///         snippets_query: snippets.clone(),
    ///         snippets_command: snippets,
    ///     },
    ///     Arc::new(Views::new().expect("templates")),
    ///     BasePath::new("/"),
    /// );
    /// assert_eq!(state.base.as_str(), "/");
    /// ```
    pub fn new(ports: HttpStatePorts, views: Arc<Views>, base: BasePath) -> Self {
        let HttpStatePorts {
            login,
            registration,
            snippets_query,
            snippets_command,
        } = ports;
        Self {
            login,
            registration,
            snippets_query,
            snippets_command,
            views,
            base,
        }
    }
}
