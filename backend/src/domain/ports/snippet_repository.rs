//! Port for snippet persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Description, Snippet, SnippetId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by snippet repository adapters.
    pub enum SnippetRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "snippet repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "snippet repository query failed: {message}",
    }
}

/// Port for reading and writing snippets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Every snippet, newest first.
    async fn list_all(&self) -> Result<Vec<Snippet>, SnippetRepositoryError>;

    async fn find_by_id(&self, id: &SnippetId)
    -> Result<Option<Snippet>, SnippetRepositoryError>;

    async fn insert(&self, snippet: &Snippet) -> Result<(), SnippetRepositoryError>;

    /// Replace the description when it differs from the stored one.
    ///
    /// Returns `true` only when a row was actually changed.
    async fn update_description(
        &self,
        id: &SnippetId,
        description: &Description,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, SnippetRepositoryError>;

    /// Returns `true` when a row was removed.
    async fn delete(&self, id: &SnippetId) -> Result<bool, SnippetRepositoryError>;
}
