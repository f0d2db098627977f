//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::header::LOCATION;
use actix_web::web;
use mockable::DefaultClock;
use std::sync::Arc;

use super::base_path::BasePath;
use super::state::{HttpState, HttpStatePorts};
use super::views::Views;
use crate::domain::{AccountService, SnippetService};
use crate::outbound::memory::{InMemorySnippetRepository, InMemoryUserRepository};
use crate::outbound::security::BcryptPasswordHasher;

pub const TEST_SESSION_COOKIE: &str = "session";

/// Session middleware for tests: fresh key, cookie named `session`, no
/// `Secure` flag so plain-HTTP test requests carry it back.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(TEST_SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == TEST_SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Ports backed by the in-memory repositories and a minimum-cost hasher.
pub fn memory_ports() -> HttpStatePorts {
    let hasher = BcryptPasswordHasher::new(BcryptPasswordHasher::MIN_COST).expect("valid cost");
    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(hasher),
    ));
    let snippets = Arc::new(SnippetService::new(
        Arc::new(InMemorySnippetRepository::default()),
        Arc::new(DefaultClock),
    ));
    HttpStatePorts {
        login: accounts.clone(),
        registration: accounts,
        snippets_query: snippets.clone(),
        snippets_command: snippets,
    }
}

/// State for handler tests mounted at `/`.
pub fn test_state(ports: HttpStatePorts) -> web::Data<HttpState> {
    let views = Arc::new(Views::new().expect("templates parse"));
    web::Data::new(HttpState::new(ports, views, BasePath::default()))
}

/// The `Location` header of a redirect.
pub fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
