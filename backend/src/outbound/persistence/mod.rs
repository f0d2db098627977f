//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories here implement the domain's driven ports on top of
//! `diesel-async` with a `bb8` pool. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) never leave this module.
//!
//! # Example
//!
//! ```ignore
//! use snippets::outbound::persistence::{DbPool, DieselSnippetRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/snippets")).await?;
//! let repo = DieselSnippetRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_snippet_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_snippet_repository::DieselSnippetRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
