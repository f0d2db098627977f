//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers deal with an identity and a one-shot
//! flash instead of raw cookie keys.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;

use super::flash::Flash;
use crate::domain::{Error, User, UserId, Username};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USERNAME_KEY: &str = "username";
pub(crate) const FLASH_KEY: &str = "flash";

/// Who is logged in on this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: UserId,
    pub username: Username,
}

/// Login state exposed to templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub logged_in: bool,
    pub username: Option<String>,
}

impl From<Option<&SessionIdentity>> for SessionView {
    fn from(identity: Option<&SessionIdentity>) -> Self {
        Self {
            logged_in: identity.is_some(),
            username: identity.map(|id| id.username.to_string()),
        }
    }
}

fn read_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

fn write_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start an authenticated session for `user`.
    ///
    /// The session is renewed first so a pre-login cookie cannot be reused.
    pub fn sign_in(&self, user: &User) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user.id().to_string())
            .map_err(write_error)?;
        self.0
            .insert(USERNAME_KEY, user.username().as_ref())
            .map_err(write_error)
    }

    /// Drop the identity. Calling it on an anonymous session is a no-op.
    pub fn sign_out(&self) {
        self.0.remove(USER_ID_KEY);
        self.0.remove(USERNAME_KEY);
        self.0.renew();
    }

    /// Current identity, if any.
    ///
    /// Values that fail validation are treated as anonymous.
    pub fn identity(&self) -> Result<Option<SessionIdentity>, Error> {
        let Some(raw_id) = self.0.get::<String>(USER_ID_KEY).map_err(read_error)? else {
            return Ok(None);
        };
        let raw_name = self
            .0
            .get::<String>(USERNAME_KEY)
            .map_err(read_error)?
            .unwrap_or_default();
        match (UserId::new(&raw_id), Username::new(&raw_name)) {
            (Ok(user_id), Ok(username)) => Ok(Some(SessionIdentity { user_id, username })),
            (Err(error), _) | (_, Err(error)) => {
                tracing::warn!("invalid identity in session cookie: {error}");
                Ok(None)
            }
        }
    }

    pub fn set_flash(&self, flash: Flash) -> Result<(), Error> {
        self.0.insert(FLASH_KEY, flash).map_err(write_error)
    }

    /// Remove and return the pending flash message.
    pub fn take_flash(&self) -> Option<Flash> {
        match self.0.remove_as::<Flash>(FLASH_KEY) {
            Some(Ok(flash)) => Some(flash),
            Some(Err(raw)) => {
                tracing::warn!(raw = %raw, "discarding unreadable flash message");
                None
            }
            None => None,
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
