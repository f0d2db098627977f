//! Application assembly: state, middleware stack and routes.
//!
//! Middleware runs outermost first: trailing-slash trimming, [`Trace`],
//! security headers, the cookie session, then [`ErrorPages`] closest to the handlers so rewritten error
//! pages still pass through the session and header layers.

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::body::{BoxBody, EitherBody};
use actix_web::cookie::{Key, SameSite, time::Duration};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{App, web};

use super::base_path::BasePath;
use super::error_pages::{ErrorPageMode, ErrorPages};
use super::routes::configure;
use super::security_headers::security_headers;
use super::session_config::SessionSettings;
use super::state::HttpState;
use crate::middleware::Trace;

/// Sessions expire one day after the last response that touched them.
pub const SESSION_TTL_DAYS: i64 = 1;

/// Cookie parameters for the session middleware.
#[derive(Clone)]
pub struct SessionCookie {
    pub key: Key,
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
}

impl From<&SessionSettings> for SessionCookie {
    fn from(settings: &SessionSettings) -> Self {
        Self {
            key: settings.key.clone(),
            name: settings.cookie_name.clone(),
            secure: settings.cookie_secure,
            same_site: settings.same_site,
        }
    }
}

/// Private (encrypted), `HttpOnly` cookie session scoped to `base`.
pub fn session_middleware(
    cookie: &SessionCookie,
    base: &BasePath,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), cookie.key.clone())
        .cookie_name(cookie.name.clone())
        .cookie_path(base.as_str().to_owned())
        .cookie_secure(cookie.secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(cookie.same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::days(SESSION_TTL_DAYS)),
        )
        .build()
}

/// Everything a worker needs to build its `App`.
#[derive(Clone)]
pub struct AppDependencies {
    pub http_state: web::Data<HttpState>,
    pub cookie: SessionCookie,
    pub mode: ErrorPageMode,
}

/// Build the application for one worker.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        cookie,
        mode,
    } = deps;
    let base = http_state.base.clone();
    let error_pages = ErrorPages::new(mode, http_state.views.clone(), base.as_str());
    let session = session_middleware(&cookie, &base);

    App::new()
        .app_data(http_state)
        .wrap(error_pages)
        .wrap(session)
        .wrap(security_headers())
        .wrap(Trace)
        .wrap(NormalizePath::trim())
        .configure(move |cfg| configure(cfg, &base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TRACE_ID_HEADER;
    use crate::inbound::http::error::{INTERNAL_ERROR_PAGE, NOT_FOUND_PAGE};
    use crate::inbound::http::test_utils::memory_ports;
    use crate::inbound::http::views::Views;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use std::sync::Arc;

    fn deps(base: &str, mode: ErrorPageMode) -> AppDependencies {
        let views = Arc::new(Views::new().expect("templates"));
        AppDependencies {
            http_state: web::Data::new(HttpState::new(memory_ports(), views, BasePath::new(base))),
            cookie: SessionCookie {
                key: Key::generate(),
                name: "snippets.sid".to_owned(),
                secure: false,
                same_site: SameSite::Lax,
            },
            mode,
        }
    }

    #[rstest]
    #[case("/", "/")]
    #[case("/board", "/board/")]
    #[actix_web::test]
    async fn home_is_served_under_base(#[case] base: &str, #[case] uri: &str) {
        let app = test::init_service(build_app(deps(base, ErrorPageMode::Production))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
        assert!(res.headers().contains_key("content-security-policy"));
    }

    #[rstest]
    #[case("/", "/snippets/")]
    #[case("/", "/user/login/")]
    #[case("/board", "/board")]
    #[case("/board", "/board/snippets/")]
    #[actix_web::test]
    async fn trailing_slash_variants_are_served(#[case] base: &str, #[case] uri: &str) {
        let app = test::init_service(build_app(deps(base, ErrorPageMode::Production))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[case(ErrorPageMode::Development)]
    #[case(ErrorPageMode::Production)]
    #[actix_web::test]
    async fn unmatched_path_renders_not_found_page(#[case] mode: ErrorPageMode) {
        let app = test::init_service(build_app(deps("/", mode))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/no/such/page").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
        assert_eq!(test::read_body(res).await, NOT_FOUND_PAGE.as_bytes());
    }

    #[actix_web::test]
    async fn malformed_form_is_hidden_in_production() {
        let app = test::init_service(build_app(deps("/", ErrorPageMode::Production))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/user/register")
                .set_form([("user", "ada")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(test::read_body(res).await, INTERNAL_ERROR_PAGE.as_bytes());
    }

    #[actix_web::test]
    async fn session_cookie_is_http_only_and_scoped_to_base() {
        let app = test::init_service(build_app(deps("/board", ErrorPageMode::Production))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/board/user/userlogin")
                .set_form([("user", "nobody"), ("password", "whatever123")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == "snippets.sid")
            .expect("session cookie");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/board/"));
    }
}
