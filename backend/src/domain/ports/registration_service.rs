//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account. A taken user name fails with `InvalidRequest`.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
