//! Error page policy middleware.
//!
//! `403`, `404` and `500` responses already carry their static page (see
//! [`ResponseError`](actix_web::ResponseError) for the domain error). Any
//! other error status is rewritten here: production hides it behind the
//! `500` page, development renders the generic error view with the handler's
//! status, message and trace identifier.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::HttpResponse;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use minijinja::context;

use super::error::{INTERNAL_ERROR_PAGE, static_page};
use super::views::{ERROR_TEMPLATE, Views};
use crate::domain::{Error, TraceId};

/// Which error pages clients see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPageMode {
    Development,
    Production,
}

impl ErrorPageMode {
    /// Parse `development` or `production` (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Development in debug builds, production otherwise.
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }
}

/// Middleware applying [`ErrorPageMode`] to error responses.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use actix_web::App;
/// use snippets::inbound::http::{ErrorPageMode, ErrorPages, Views};
///
/// let views = Arc::new(Views::new().expect("templates"));
/// let app = App::new().wrap(ErrorPages::new(ErrorPageMode::Production, views, "/"));
/// ```
#[derive(Clone)]
pub struct ErrorPages {
    mode: ErrorPageMode,
    views: Arc<Views>,
    base_url: String,
}

impl ErrorPages {
    pub fn new(mode: ErrorPageMode, views: Arc<Views>, base_url: impl Into<String>) -> Self {
        Self {
            mode,
            views,
            base_url: base_url.into(),
        }
    }

    fn rewrites(status: StatusCode) -> bool {
        (status.is_client_error() || status.is_server_error()) && static_page(status).is_none()
    }

    fn page_for(&self, status: StatusCode, message: &str) -> HttpResponse {
        match self.mode {
            ErrorPageMode::Production => {
                tracing::warn!(status = status.as_u16(), message, "error hidden behind 500 page");
                internal_error_page()
            }
            ErrorPageMode::Development => {
                let ctx = context! {
                    status => status.as_u16(),
                    reason => status.canonical_reason().unwrap_or("Error"),
                    message => message,
                    trace_id => TraceId::current().map(|id| id.to_string()),
                    base_url => &self.base_url,
                };
                match self.views.render(ERROR_TEMPLATE, ctx) {
                    Ok(html) => HttpResponse::build(status)
                        .content_type(ContentType::html())
                        .body(html),
                    Err(_) => internal_error_page(),
                }
            }
        }
    }
}

fn internal_error_page() -> HttpResponse {
    HttpResponse::InternalServerError()
        .content_type(ContentType::html())
        .body(INTERNAL_ERROR_PAGE)
}

fn error_message<B>(res: &ServiceResponse<B>) -> String {
    match res.response().error() {
        Some(err) => err
            .as_error::<Error>()
            .map_or_else(|| err.to_string(), |domain| domain.message().to_owned()),
        None => res
            .status()
            .canonical_reason()
            .unwrap_or("Error")
            .to_owned(),
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorPages
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = ErrorPagesMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorPagesMiddleware {
            service,
            policy: Rc::new(self.clone()),
        }))
    }
}

/// Service wrapper produced by [`ErrorPages`].
pub struct ErrorPagesMiddleware<S> {
    service: S,
    policy: Rc<ErrorPages>,
}

impl<S, B> Service<ServiceRequest> for ErrorPagesMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let policy = Rc::clone(&self.policy);
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            let status = res.status();
            if !ErrorPages::rewrites(status) {
                return Ok(res.map_into_left_body());
            }
            let message = error_message(&res);
            let (req, _) = res.into_parts();
            let response = policy.page_for(status, &message);
            Ok(ServiceResponse::new(req, response).map_into_right_body())
        })
    }
}
