//! Account pages and form handlers.
//!
//! ```text
//! GET  /user/registration   POST /user/register
//! GET  /user/login          POST /user/userlogin
//! GET  /user/logout         POST /user/userlogout
//! ```
//!
//! Validation and credential failures become a danger flash plus a redirect
//! back to the form; everything else goes to the error pages.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;

use super::flash::{Flash, LOGGED_IN, LOGGED_OUT, USER_REGISTERED};
use super::guard::{CurrentUser, Viewer};
use super::session::SessionContext;
use super::state::HttpState;
use super::views::render_page;
use crate::domain::{Error, INVALID_LOGIN_MESSAGE, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;

/// Body of the registration and login forms.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub user: String,
    pub password: String,
}

/// Flash a correctable failure and send the browser back to `form`.
fn bounce(
    state: &HttpState,
    session: &SessionContext,
    form: &str,
    error: Error,
) -> ApiResult<HttpResponse> {
    if !error.is_user_correctable() {
        return Err(error);
    }
    session.set_flash(Flash::danger(error.message()))?;
    Ok(state.base.redirect(form))
}

#[get("/user/registration")]
pub async fn registration_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    viewer: Viewer,
) -> ApiResult<HttpResponse> {
    render_page(&state, &session, viewer.identity(), "user/registration.html", ())
}

#[post("/user/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let registration = match Registration::try_from_parts(&form.user, &form.password) {
        Ok(registration) => registration,
        Err(err) => {
            let error = Error::invalid_request(err.to_string());
            return bounce(&state, &session, "user/registration", error);
        }
    };
    match state.registration.register(&registration).await {
        Ok(user) => {
            info!(user_id = %user.id(), "user registered");
            session.set_flash(Flash::success(USER_REGISTERED))?;
            Ok(state.base.redirect("user/login"))
        }
        Err(error) => bounce(&state, &session, "user/registration", error),
    }
}

#[get("/user/login")]
pub async fn login_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    viewer: Viewer,
) -> ApiResult<HttpResponse> {
    render_page(&state, &session, viewer.identity(), "user/login.html", ())
}

#[post("/user/userlogin")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let Ok(credentials) = LoginCredentials::try_from_parts(&form.user, &form.password) else {
        let error = Error::unauthorized(INVALID_LOGIN_MESSAGE);
        return bounce(&state, &session, "user/login", error);
    };
    match state.login.authenticate(&credentials).await {
        Ok(user) => {
            session.sign_in(&user)?;
            session.set_flash(Flash::success(LOGGED_IN))?;
            info!(user_id = %user.id(), "user logged in");
            Ok(state.base.redirect("snippets"))
        }
        Err(error) => bounce(&state, &session, "user/login", error),
    }
}

#[get("/user/logout")]
pub async fn logout_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    render_page(&state, &session, Some(&user.0), "user/logout.html", ())
}

#[post("/user/userlogout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.sign_out();
    session.set_flash(Flash::success(LOGGED_OUT))?;
    Ok(state.base.redirect(""))
}
