//! Process-local repositories.
//!
//! Used when no database URL is configured and throughout the HTTP tests.
//! State lives for the lifetime of the process only.

mod snippet_repository;
mod user_repository;

pub use snippet_repository::InMemorySnippetRepository;
pub use user_repository::InMemoryUserRepository;
