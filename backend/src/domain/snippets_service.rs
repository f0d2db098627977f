//! Snippet lifecycle services.
//!
//! One service implements both [`SnippetsQuery`] and [`SnippetsCommand`];
//! every path that touches an existing record runs the ownership gate first.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ownership::{authorise, require_viewer};
use crate::domain::ports::{
    DeleteOutcome, SnippetRepository, SnippetRepositoryError, SnippetsCommand, SnippetsQuery,
    UpdateOutcome,
};
use crate::domain::{
    Description, Error, Snippet, SnippetDraft, SnippetId, SnippetListing, UserId, Username,
};

fn map_repository_error(error: SnippetRepositoryError) -> Error {
    match error {
        SnippetRepositoryError::Connection { message } => {
            Error::internal(format!("snippet repository unavailable: {message}"))
        }
        SnippetRepositoryError::Query { message } => {
            Error::internal(format!("snippet repository error: {message}"))
        }
    }
}

fn parse_description(text: &str) -> Result<Description, Error> {
    Description::new(text).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Snippet use-cases over a repository.
#[derive(Clone)]
pub struct SnippetService<S> {
    snippets: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> SnippetService<S> {
    pub fn new(snippets: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { snippets, clock }
    }
}

impl<S> SnippetService<S>
where
    S: SnippetRepository,
{
    async fn gate(&self, id: &SnippetId, viewer: Option<&UserId>) -> Result<Snippet, Error> {
        let viewer = require_viewer(viewer)?;
        let found = self
            .snippets
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?;
        authorise(id, found, viewer)
    }
}

#[async_trait]
impl<S> SnippetsQuery for SnippetService<S>
where
    S: SnippetRepository,
{
    async fn list(&self, viewer: Option<&UserId>) -> Result<SnippetListing, Error> {
        let snippets = self
            .snippets
            .list_all()
            .await
            .map_err(map_repository_error)?;
        Ok(SnippetListing::partition(&snippets, viewer))
    }

    async fn load_for_edit(
        &self,
        id: &SnippetId,
        viewer: Option<&UserId>,
    ) -> Result<Snippet, Error> {
        self.gate(id, viewer).await
    }
}

#[async_trait]
impl<S> SnippetsCommand for SnippetService<S>
where
    S: SnippetRepository,
{
    async fn create(
        &self,
        description: &str,
        owner: &UserId,
        author: &Username,
    ) -> Result<Snippet, Error> {
        let description = parse_description(description)?;
        let now = self.clock.utc();
        let snippet = Snippet::new(SnippetDraft {
            id: SnippetId::random(),
            description,
            owner: *owner,
            author: author.clone(),
            created_at: now,
            updated_at: now,
        });
        self.snippets
            .insert(&snippet)
            .await
            .map_err(map_repository_error)?;
        tracing::info!(snippet_id = %snippet.id(), user_id = %owner, "snippet created");
        Ok(snippet)
    }

    async fn update(
        &self,
        id: &SnippetId,
        viewer: Option<&UserId>,
        description: &str,
    ) -> Result<UpdateOutcome, Error> {
        let current = self.gate(id, viewer).await?;
        let description = parse_description(description)?;
        if current.description() == &description {
            return Ok(UpdateOutcome::Unchanged);
        }
        let changed = self
            .snippets
            .update_description(id, &description, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        Ok(if changed {
            UpdateOutcome::Updated
        } else {
            UpdateOutcome::Unchanged
        })
    }

    async fn delete(
        &self,
        id: &SnippetId,
        viewer: Option<&UserId>,
    ) -> Result<DeleteOutcome, Error> {
        self.gate(id, viewer).await?;
        let removed = self
            .snippets
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if removed {
            tracing::info!(snippet_id = %id, "snippet deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NotDeleted)
        }
    }
}

#[cfg(test)]
#[path = "snippets_service_tests.rs"]
mod tests;
