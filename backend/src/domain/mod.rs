//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed records (users, snippets), the
//! ownership rules around them, and the ports adapters plug into. Nothing in
//! here knows about HTTP, cookies or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure and its category.
//! - User, Username, UserId, PasswordHash: account records.
//! - Snippet, SnippetId, Description, SnippetListing: snippet records.
//! - LoginCredentials, Registration: validated auth inputs.
//! - AccountService, SnippetService: implementations of the driving ports.
//! - TraceId: request-scoped correlation identifier.

pub mod accounts;
pub mod auth;
pub mod error;
mod ownership;
pub mod ports;
pub mod snippet;
pub mod snippets_service;
pub mod trace_id;
pub mod user;

pub use self::accounts::AccountService;
pub use self::auth::{
    INVALID_LOGIN_MESSAGE, LoginCredentials, LoginValidationError, PASSWORD_MAX, PASSWORD_MIN,
    Registration, RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::snippet::{
    Description, Snippet, SnippetDraft, SnippetId, SnippetListing, SnippetSummary,
    SnippetValidationError,
};
pub use self::snippets_service::SnippetService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{PasswordHash, USERNAME_MAX, User, UserId, UserValidationError, Username};

/// Convenient result alias for handlers and services.
///
/// # Examples
/// ```
/// use snippets::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(Error::not_found("nothing here"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
