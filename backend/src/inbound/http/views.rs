//! Server-side page rendering.
//!
//! Templates are compiled into the binary and registered once at startup.
//! Every page sees a `page` object (base URL, login state, consumed flash)
//! and a page-specific `view` value.

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use minijinja::{Environment, Value, context};
use serde::Serialize;

use super::flash::Flash;
use super::session::{SessionContext, SessionIdentity, SessionView};
use super::state::HttpState;
use crate::domain::Error;

pub(crate) const ERROR_TEMPLATE: &str = "errors/error.html";

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../../templates/layout.html")),
    ("home.html", include_str!("../../../templates/home.html")),
    (
        "snippets/index.html",
        include_str!("../../../templates/snippets/index.html"),
    ),
    (
        "snippets/new.html",
        include_str!("../../../templates/snippets/new.html"),
    ),
    (
        "snippets/edit.html",
        include_str!("../../../templates/snippets/edit.html"),
    ),
    (
        "snippets/remove.html",
        include_str!("../../../templates/snippets/remove.html"),
    ),
    (
        "user/registration.html",
        include_str!("../../../templates/user/registration.html"),
    ),
    (
        "user/login.html",
        include_str!("../../../templates/user/login.html"),
    ),
    (
        "user/logout.html",
        include_str!("../../../templates/user/logout.html"),
    ),
    (
        ERROR_TEMPLATE,
        include_str!("../../../templates/errors/error.html"),
    ),
];

/// Compiled template set.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Register every bundled template.
    ///
    /// # Errors
    /// Returns the template syntax error if any bundled template fails to
    /// parse.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render `name` with `ctx`.
    pub fn render(&self, name: &str, ctx: Value) -> Result<String, Error> {
        let template = self.env.get_template(name).map_err(template_error)?;
        template.render(ctx).map_err(template_error)
    }
}

fn template_error(error: minijinja::Error) -> Error {
    tracing::error!(%error, "template rendering failed");
    Error::internal(format!("template rendering failed: {error}"))
}

/// Values shared by every page.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub base_url: String,
    pub session: SessionView,
    pub flash: Option<Flash>,
}

impl PageContext {
    /// Build the context for the current request, consuming any pending
    /// flash message.
    pub fn consume(
        state: &HttpState,
        session: &SessionContext,
        identity: Option<&SessionIdentity>,
    ) -> Self {
        Self {
            base_url: state.base.as_str().to_owned(),
            session: SessionView::from(identity),
            flash: session.take_flash(),
        }
    }
}

/// Render `template` as a `200 OK` HTML page.
pub fn render_page<V: Serialize>(
    state: &HttpState,
    session: &SessionContext,
    identity: Option<&SessionIdentity>,
    template: &str,
    view: V,
) -> Result<HttpResponse, Error> {
    let page = PageContext::consume(state, session, identity);
    let html = state
        .views
        .render(template, context! { page => page, view => view })?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}
