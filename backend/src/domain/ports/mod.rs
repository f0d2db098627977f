//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by
//! outbound adapters. Driving ports (`*Service`, `*Query`, `*Command`) are
//! what HTTP handlers call.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod registration_service;
mod snippet_repository;
mod snippets_command;
mod snippets_query;
mod user_repository;

pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use snippet_repository::MockSnippetRepository;
pub use snippet_repository::{SnippetRepository, SnippetRepositoryError};
pub use snippets_command::{DeleteOutcome, SnippetsCommand, UpdateOutcome};
pub use snippets_query::SnippetsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
