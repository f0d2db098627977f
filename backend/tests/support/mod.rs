//! Shared helper utilities for backend integration tests.
//!
//! Builds the full application over in-memory storage and drives it with a
//! small per-user cookie jar, so scenarios read like browser sessions.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{test, web};
use mockable::DefaultClock;

use snippets::domain::ports::SnippetsQuery;
use snippets::domain::{AccountService, SnippetService};
use snippets::inbound::http::{
    AppDependencies, BasePath, ErrorPageMode, HttpState, HttpStatePorts, SessionCookie, Views,
    build_app,
};
use snippets::outbound::memory::{InMemorySnippetRepository, InMemoryUserRepository};
use snippets::outbound::security::BcryptPasswordHasher;

pub const COOKIE_NAME: &str = "snippets.sid";

pub type AppResponse = ServiceResponse<EitherBody<BoxBody>>;

/// Ports over fresh in-memory repositories with the cheapest bcrypt cost.
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

/// Initialised application plus a handle on its snippet query port.
pub async fn spawn_app() -> (
    impl Service<Request, Response = AppResponse, Error = actix_web::Error>,
    Arc<dyn SnippetsQuery>,
) {
    let ports = memory_ports();
    let query = ports.snippets_query.clone();
    let views = Arc::new(Views::new().expect("templates"));
    let deps = AppDependencies {
        http_state: web::Data::new(HttpState::new(ports, views, BasePath::default())),
        cookie: SessionCookie {
            key: Key::generate(),
            name: COOKIE_NAME.to_owned(),
            secure: false,
            same_site: SameSite::Lax,
        },
        mode: ErrorPageMode::Production,
    };
    (test::init_service(build_app(deps)).await, query)
}

/// Quoted `href`/`action` value for `path` under the root base path, as the
/// templates render it (auto-escape writes `/` as `&#x2f;`).
pub fn url_attr(path: &str) -> String {
    format!("\"&#x2f;{path}\"")
}

/// One visitor: remembers the latest session cookie the app handed out.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
}

/// Status, redirect target and body of a response.
pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl Browser {
    async fn send<S>(&mut self, app: &S, req: test::TestRequest) -> Page
    where
        S: Service<Request, Response = AppResponse, Error = actix_web::Error>,
    {
        let req = match &self.cookie {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        };
        let res = test::call_service(app, req.to_request()).await;
        if let Some(cookie) = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == COOKIE_NAME)
        {
            self.cookie = Some(cookie.into_owned());
        }
        let status = res.status();
        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = test::read_body(res).await;
        Page {
            status,
            location,
            body: String::from_utf8(body.to_vec()).expect("utf8 body"),
        }
    }

    pub async fn get<S>(&mut self, app: &S, uri: &str) -> Page
    where
        S: Service<Request, Response = AppResponse, Error = actix_web::Error>,
    {
        self.send(app, test::TestRequest::get().uri(uri)).await
    }

    pub async fn post<S>(&mut self, app: &S, uri: &str, form: &[(&str, &str)]) -> Page
    where
        S: Service<Request, Response = AppResponse, Error = actix_web::Error>,
    {
        self.send(app, test::TestRequest::post().uri(uri).set_form(form))
            .await
    }

    /// Register `user` and log in; the browser ends up authenticated.
    pub async fn sign_up<S>(&mut self, app: &S, user: &str, password: &str)
    where
        S: Service<Request, Response = AppResponse, Error = actix_web::Error>,
    {
        let form = [("user", user), ("password", password)];
        let registered = self.post(app, "/user/register", &form).await;
        assert_eq!(registered.location.as_deref(), Some("/user/login"));
        let logged_in = self.post(app, "/user/userlogin", &form).await;
        assert_eq!(logged_in.location.as_deref(), Some("/snippets"));
    }
}
