//! Landing page.

use actix_web::{HttpResponse, routes, web};

use super::guard::Viewer;
use super::session::SessionContext;
use super::state::HttpState;
use super::views::render_page;
use crate::inbound::http::ApiResult;

/// The bare base path (`/board`) arrives empty once trailing slashes are trimmed.
#[routes]
#[get("")]
#[get("/")]
pub async fn home(
    state: web::Data<HttpState>,
    session: SessionContext,
    viewer: Viewer,
) -> ApiResult<HttpResponse> {
    render_page(&state, &session, viewer.identity(), "home.html", ())
}
