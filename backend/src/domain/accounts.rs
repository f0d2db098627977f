//! Account registration and login.
//!
//! `AccountService` implements both the [`RegistrationService`] and
//! [`LoginService`] driving ports on top of a user repository and a password
//! hasher.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::INVALID_LOGIN_MESSAGE;
use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, RegistrationService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

pub(crate) const USERNAME_TAKEN_MESSAGE: &str = "The user name is already taken.";

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::invalid_request(USERNAME_TAKEN_MESSAGE)
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

/// Account use-cases backed by a repository and a hasher.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> RegistrationService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hash_error)?;
        let user = User::new(UserId::random(), registration.username().clone(), hash);
        self.users
            .insert(&user)
            .await
            .map_err(map_repository_error)?;
        tracing::info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_repository_error)?
        else {
            tracing::debug!("login rejected: unknown user name");
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        };
        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_hash_error)?;
        if !matches {
            tracing::debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        }
        Ok(user)
    }
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
