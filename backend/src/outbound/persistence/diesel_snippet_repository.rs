//! PostgreSQL-backed `SnippetRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SnippetRepository, SnippetRepositoryError};
use crate::domain::{Description, Snippet, SnippetDraft, SnippetId, UserId, Username};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewSnippetRow, SnippetDescriptionUpdate, SnippetRow};
use super::pool::DbPool;
use super::schema::snippets;

/// Diesel-backed implementation of the `SnippetRepository` port.
#[derive(Clone)]
pub struct DieselSnippetRepository {
    pool: DbPool,
}

impl DieselSnippetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn query_error(error: diesel::result::Error) -> SnippetRepositoryError {
    map_diesel_error(
        error,
        SnippetRepositoryError::query,
        SnippetRepositoryError::connection,
    )
}

fn row_to_snippet(row: SnippetRow) -> Result<Snippet, SnippetRepositoryError> {
    let description = Description::new(&row.description).map_err(|err| {
        SnippetRepositoryError::query(format!("stored description invalid: {err}"))
    })?;
    let author = Username::new(&row.author)
        .map_err(|err| SnippetRepositoryError::query(format!("stored author invalid: {err}")))?;
    Ok(Snippet::new(SnippetDraft {
        id: SnippetId::from_uuid(row.id),
        description,
        owner: UserId::from_uuid(row.owner_id),
        author,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

#[async_trait]
impl SnippetRepository for DieselSnippetRepository {
    async fn list_all(&self) -> Result<Vec<Snippet>, SnippetRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SnippetRepositoryError::connection))?;

        let rows: Vec<SnippetRow> = snippets::table
            .order((snippets::created_at.desc(), snippets::id.desc()))
            .select(SnippetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_error)?;

        rows.into_iter().map(row_to_snippet).collect()
    }

    async fn find_by_id(
        &self,
        id: &SnippetId,
    ) -> Result<Option<Snippet>, SnippetRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SnippetRepositoryError::connection))?;

        let row: Option<SnippetRow> = snippets::table
            .find(id.as_uuid())
            .select(SnippetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_error)?;

        row.map(row_to_snippet).transpose()
    }

    async fn insert(&self, snippet: &Snippet) -> Result<(), SnippetRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SnippetRepositoryError::connection))?;

        let row = NewSnippetRow {
            id: *snippet.id().as_uuid(),
            description: snippet.description().as_ref(),
            owner_id: *snippet.owner().as_uuid(),
            author: snippet.author().as_ref(),
            created_at: snippet.created_at(),
            updated_at: snippet.updated_at(),
        };

        diesel::insert_into(snippets::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(query_error)
    }

    async fn update_description(
        &self,
        id: &SnippetId,
        description: &Description,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, SnippetRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SnippetRepositoryError::connection))?;

        let text = description.as_ref();
        let changed = diesel::update(snippets::table)
            .filter(
                snippets::id
                    .eq(id.as_uuid())
                    .and(snippets::description.ne(text)),
            )
            .set(&SnippetDescriptionUpdate {
                description: text,
                updated_at,
            })
            .execute(&mut conn)
            .await
            .map_err(query_error)?;

        Ok(changed > 0)
    }

    async fn delete(&self, id: &SnippetId) -> Result<bool, SnippetRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SnippetRepositoryError::connection))?;

        let removed = diesel::delete(snippets::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(query_error)?;

        Ok(removed > 0)
    }
}
