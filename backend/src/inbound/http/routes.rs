//! Dispatch table.
//!
//! Every page hangs off the configured base path; anything unmatched is a
//! `404 Not Found` handled by the error pages.

use actix_web::{HttpResponse, web};

use super::base_path::BasePath;
use super::{home, snippets, users};
use crate::domain::Error;

async fn not_found() -> Result<HttpResponse, Error> {
    Err(Error::not_found("Resource not found"))
}

/// Mount all pages under `base`.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use snippets::inbound::http::{BasePath, configure};
///
/// let base = BasePath::new("/");
/// let app = App::new().configure(|cfg| configure(cfg, &base));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig, base: &BasePath) {
    cfg.service(
        web::scope(base.scope())
            .service(home::home)
            .service(snippets::index)
            .service(snippets::new_form)
            .service(snippets::create)
            .service(snippets::edit_form)
            .service(snippets::update)
            .service(snippets::remove_form)
            .service(snippets::delete)
            .service(users::registration_form)
            .service(users::register)
            .service(users::login_form)
            .service(users::login)
            .service(users::logout_form)
            .service(users::logout),
    )
    .default_service(web::to(not_found));
}
