//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use snippets::inbound::http::{BasePath, ErrorPageMode, SessionCookie};
use snippets::outbound::persistence::DbPool;
use snippets::outbound::security::BcryptPasswordHasher;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) cookie: SessionCookie,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) base: BasePath,
    pub(crate) mode: ErrorPageMode,
    pub(crate) hasher: BcryptPasswordHasher,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration with default page settings and
    /// in-memory storage.
    #[must_use]
    pub fn new(cookie: SessionCookie, bind_addr: SocketAddr) -> Self {
        Self {
            cookie,
            bind_addr,
            base: BasePath::default(),
            mode: ErrorPageMode::for_build(),
            hasher: BcryptPasswordHasher::default(),
            db_pool: None,
        }
    }

    /// Mount every page under `base`.
    #[must_use]
    pub fn with_base_path(mut self, base: BasePath) -> Self {
        self.base = base;
        self
    }

    #[must_use]
    pub fn with_error_pages(mut self, mode: ErrorPageMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_password_hasher(mut self, hasher: BcryptPasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, users and snippets are stored in PostgreSQL; otherwise
    /// they live in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
