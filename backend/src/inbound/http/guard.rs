//! Identity extractors.
//!
//! Handlers never branch on "is someone logged in" themselves: they ask for
//! [`CurrentUser`] when a login is required and [`Viewer`] when it is
//! optional.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use super::session::{SessionContext, SessionIdentity};
use crate::domain::{Error, UserId};

/// Authenticated caller. Anonymous requests fail with `404 Not Found` so a
/// login-only page is indistinguishable from a missing one.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionIdentity);

/// Caller that may or may not be logged in.
#[derive(Debug, Clone, Default)]
pub struct Viewer(pub Option<SessionIdentity>);

impl Viewer {
    pub fn user_id(&self) -> Option<&UserId> {
        self.0.as_ref().map(|identity| &identity.user_id)
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.0.as_ref()
    }
}

impl FromRequest for Viewer {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let session = fut.await?;
            Ok(Viewer(session.identity()?))
        })
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Viewer::from_request(req, payload);
        Box::pin(async move {
            match fut.await?.0 {
                Some(identity) => Ok(CurrentUser(identity)),
                None => Err(Error::not_found("page not found").into()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn anonymous_current_user_is_not_found() {
        let app = test::init_service(
            App::new().wrap(test_session_middleware()).route(
                "/private",
                web::get().to(|_user: CurrentUser| async { HttpResponse::Ok() }),
            ),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/private").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn anonymous_viewer_is_allowed() {
        let app = test::init_service(
            App::new().wrap(test_session_middleware()).route(
                "/public",
                web::get().to(|viewer: Viewer| async move {
                    HttpResponse::Ok().body(if viewer.user_id().is_some() { "user" } else { "anon" })
                }),
            ),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/public").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "anon");
    }
}
