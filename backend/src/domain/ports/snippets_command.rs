//! Driving port for snippet mutations.

use async_trait::async_trait;

use crate::domain::{Error, Snippet, SnippetId, UserId, Username};

/// Result of an update that passed the ownership gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    /// The new text matched the stored text; nothing was written.
    Unchanged,
}

/// Result of a delete that passed the ownership gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The row vanished between the gate and the delete.
    NotDeleted,
}

#[async_trait]
pub trait SnippetsCommand: Send + Sync {
    /// Validate and store a new snippet. A blank description fails with
    /// `InvalidRequest` and persists nothing.
    async fn create(
        &self,
        description: &str,
        owner: &UserId,
        author: &Username,
    ) -> Result<Snippet, Error>;

    /// Replace the description of an owned snippet.
    async fn update(
        &self,
        id: &SnippetId,
        viewer: Option<&UserId>,
        description: &str,
    ) -> Result<UpdateOutcome, Error>;

    /// Remove an owned snippet.
    async fn delete(
        &self,
        id: &SnippetId,
        viewer: Option<&UserId>,
    ) -> Result<DeleteOutcome, Error>;
}
