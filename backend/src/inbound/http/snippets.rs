//! Snippet board handlers.
//!
//! ```text
//! GET  /snippets                 list (own + others)
//! GET  /snippets/new             POST /snippets/create
//! GET  /snippets/{id}/edit       POST /snippets/{id}/update
//! GET  /snippets/{id}/remove     POST /snippets/{id}/delete
//! ```
//!
//! The ownership gate lives in the snippet service; handlers only translate
//! its outcomes into flashes and redirects.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use super::flash::{
    Flash, SNIPPET_CREATED, SNIPPET_DELETED, SNIPPET_NOT_DELETED, SNIPPET_NOT_UPDATED,
    SNIPPET_UPDATED,
};
use super::guard::{CurrentUser, Viewer};
use super::session::SessionContext;
use super::state::HttpState;
use super::views::render_page;
use crate::domain::ports::{DeleteOutcome, UpdateOutcome};
use crate::domain::{Error, SnippetId, SnippetSummary};
use crate::inbound::http::ApiResult;

/// Body of the create and edit forms.
///
/// A missing field reads as empty so it fails description validation.
#[derive(Debug, Deserialize)]
pub struct DescriptionForm {
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize)]
struct SnippetView {
    snippet: SnippetSummary,
}

/// Malformed ids are indistinguishable from missing ones.
fn parse_id(raw: &str) -> ApiResult<SnippetId> {
    SnippetId::new(raw).map_err(|_| Error::not_found("snippet not found"))
}

#[get("/snippets")]
pub async fn index(
    state: web::Data<HttpState>,
    session: SessionContext,
    viewer: Viewer,
) -> ApiResult<HttpResponse> {
    let listing = state.snippets_query.list(viewer.user_id()).await?;
    render_page(&state, &session, viewer.identity(), "snippets/index.html", listing)
}

#[get("/snippets/new")]
pub async fn new_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    render_page(&state, &session, Some(&user.0), "snippets/new.html", ())
}

#[post("/snippets/create")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: CurrentUser,
    form: web::Form<DescriptionForm>,
) -> ApiResult<HttpResponse> {
    let CurrentUser(identity) = user;
    match state
        .snippets_command
        .create(&form.description, &identity.user_id, &identity.username)
        .await
    {
        Ok(_) => {
            session.set_flash(Flash::success(SNIPPET_CREATED))?;
            Ok(state.base.redirect("snippets"))
        }
        Err(error) if error.is_user_correctable() => {
            session.set_flash(Flash::danger(error.message()))?;
            Ok(state.base.redirect("snippets/new"))
        }
        Err(error) => Err(error),
    }
}

async fn gated_page(
    state: &HttpState,
    session: &SessionContext,
    viewer: &Viewer,
    raw_id: &str,
    template: &str,
) -> ApiResult<HttpResponse> {
    let id = parse_id(raw_id)?;
    let snippet = state
        .snippets_query
        .load_for_edit(&id, viewer.user_id())
        .await?;
    let view = SnippetView {
        snippet: SnippetSummary::from(&snippet),
    };
    render_page(state, session, viewer.identity(), template, view)
}

#[get("/snippets/{id}/edit")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    viewer: Viewer,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    gated_page(&state, &session, &viewer, &path, "snippets/edit.html").await
}

#[post("/snippets/{id}/update")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    viewer: Viewer,
    path: web::Path<String>,
    form: web::Form<DescriptionForm>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let outcome = state
        .snippets_command
        .update(&id, viewer.user_id(), &form.description)
        .await;
    let flash = match outcome {
        Ok(UpdateOutcome::Updated) => Flash::success(SNIPPET_UPDATED),
        Ok(UpdateOutcome::Unchanged) => Flash::danger(SNIPPET_NOT_UPDATED),
        Err(error) if error.is_user_correctable() => {
            session.set_flash(Flash::danger(error.message()))?;
            return Ok(state.base.redirect(&format!("snippets/{id}/edit")));
        }
        Err(error) => return Err(error),
    };
    session.set_flash(flash)?;
    Ok(state.base.redirect("snippets"))
}

#[get("/snippets/{id}/remove")]
pub async fn remove_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    viewer: Viewer,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    gated_page(&state, &session, &viewer, &path, "snippets/remove.html").await
}

#[post("/snippets/{id}/delete")]
pub async fn delete(
    state: web::Data<HttpState>,
    session: SessionContext,
    viewer: Viewer,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let flash = match state.snippets_command.delete(&id, viewer.user_id()).await? {
        DeleteOutcome::Deleted => Flash::success(SNIPPET_DELETED),
        DeleteOutcome::NotDeleted => Flash::danger(SNIPPET_NOT_DELETED),
    };
    session.set_flash(flash)?;
    Ok(state.base.redirect("snippets"))
}

#[cfg(test)]
#[path = "snippets_tests.rs"]
mod tests;
