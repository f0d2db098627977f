//! Driving port for snippet reads.

use async_trait::async_trait;

use crate::domain::{Error, Snippet, SnippetId, SnippetListing, UserId};

#[async_trait]
pub trait SnippetsQuery: Send + Sync {
    /// All snippets split into the viewer's own and everybody else's.
    async fn list(&self, viewer: Option<&UserId>) -> Result<SnippetListing, Error>;

    /// Load a snippet the viewer intends to change.
    ///
    /// Anonymous viewers and missing ids fail with `NotFound`; foreign
    /// snippets fail with `Forbidden`.
    async fn load_for_edit(
        &self,
        id: &SnippetId,
        viewer: Option<&UserId>,
    ) -> Result<Snippet, Error>;
}
