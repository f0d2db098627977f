//! In-memory `SnippetRepository`.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{SnippetRepository, SnippetRepositoryError};
use crate::domain::{Description, Snippet, SnippetDraft, SnippetId};

/// Snippets in insertion order.
#[derive(Debug, Default)]
pub struct InMemorySnippetRepository {
    rows: RwLock<Vec<Snippet>>,
}

impl InMemorySnippetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> SnippetRepositoryError {
    SnippetRepositoryError::query("snippet store lock poisoned")
}

#[async_trait]
impl SnippetRepository for InMemorySnippetRepository {
    async fn list_all(&self) -> Result<Vec<Snippet>, SnippetRepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        // Reverse first so equal timestamps still come out newest first.
        let mut listed: Vec<Snippet> = rows.iter().rev().cloned().collect();
        listed.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(listed)
    }

    async fn find_by_id(
        &self,
        id: &SnippetId,
    ) -> Result<Option<Snippet>, SnippetRepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn insert(&self, snippet: &Snippet) -> Result<(), SnippetRepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        if rows.iter().any(|row| row.id() == snippet.id()) {
            return Err(SnippetRepositoryError::query(format!(
                "snippet {} already exists",
                snippet.id()
            )));
        }
        rows.push(snippet.clone());
        Ok(())
    }

    async fn update_description(
        &self,
        id: &SnippetId,
        description: &Description,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, SnippetRepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let Some(row) = rows.iter_mut().find(|row| row.id() == id) else {
            return Ok(false);
        };
        if row.description() == description {
            return Ok(false);
        }
        *row = Snippet::new(SnippetDraft {
            id: *row.id(),
            description: description.clone(),
            owner: *row.owner(),
            author: row.author().clone(),
            created_at: row.created_at(),
            updated_at,
        });
        Ok(true)
    }

    async fn delete(&self, id: &SnippetId) -> Result<bool, SnippetRepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        Ok(rows.len() < before)
    }
}
