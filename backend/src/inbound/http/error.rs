//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers return it directly. `403`, `404` and `500` render static pages;
//! anything else carries its message as plain text and is left to the
//! [`ErrorPages`](super::error_pages::ErrorPages) middleware.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

pub(crate) const NOT_FOUND_PAGE: &str = include_str!("../../../templates/errors/404.html");
pub(crate) const FORBIDDEN_PAGE: &str = include_str!("../../../templates/errors/403.html");
pub(crate) const INTERNAL_ERROR_PAGE: &str = include_str!("../../../templates/errors/500.html");

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Static page for the three statuses that always get one.
pub(crate) fn static_page(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::NOT_FOUND => Some(NOT_FOUND_PAGE),
        StatusCode::FORBIDDEN => Some(FORBIDDEN_PAGE),
        StatusCode::INTERNAL_SERVER_ERROR => Some(INTERNAL_ERROR_PAGE),
        _ => None,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        if let Some(page) = static_page(status) {
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                error!(message = %self.message(), trace_id = ?self.trace_id(), "internal error");
            }
            return builder.content_type(ContentType::html()).body(page);
        }
        builder
            .content_type(ContentType::plaintext())
            .body(self.message().to_owned())
    }
}
