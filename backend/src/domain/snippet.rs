//! Snippet records and their list projection.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{UserId, Username};

/// Validation errors for snippet fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetValidationError {
    InvalidId,
    EmptyDescription,
}

impl fmt::Display for SnippetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "snippet id must be a valid UUID"),
            Self::EmptyDescription => write!(f, "The description must not be empty."),
        }
    }
}

impl std::error::Error for SnippetValidationError {}

/// Stable snippet identifier taken from the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnippetId(Uuid);

impl SnippetId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, SnippetValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(SnippetValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| SnippetValidationError::InvalidId)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Snippet body, stored trimmed and never blank.
///
/// # Examples
/// ```
/// use snippets::domain::Description;
///
/// assert_eq!(Description::new("  buy milk ").unwrap().as_ref(), "buy milk");
/// assert!(Description::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    pub fn new(text: impl AsRef<str>) -> Result<Self, SnippetValidationError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SnippetValidationError::EmptyDescription);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Persisted snippet.
///
/// ## Invariants
/// - `owner` never changes after creation.
/// - `updated_at >= created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    id: SnippetId,
    description: Description,
    owner: UserId,
    author: Username,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Field bundle for [`Snippet::new`].
#[derive(Debug, Clone)]
pub struct SnippetDraft {
    pub id: SnippetId,
    pub description: Description,
    pub owner: UserId,
    pub author: Username,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    pub fn new(draft: SnippetDraft) -> Self {
        let SnippetDraft {
            id,
            description,
            owner,
            author,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            description,
            owner,
            author,
            created_at,
            updated_at: updated_at.max(created_at),
        }
    }

    pub fn id(&self) -> &SnippetId {
        &self.id
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn author(&self) -> &Username {
        &self.author
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }
}

/// Row shown on the list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetSummary {
    pub id: String,
    pub description: String,
    pub owner: String,
    pub author: String,
}

impl From<&Snippet> for SnippetSummary {
    fn from(value: &Snippet) -> Self {
        Self {
            id: value.id.to_string(),
            description: value.description.as_ref().to_owned(),
            owner: value.owner.to_string(),
            author: value.author.as_ref().to_owned(),
        }
    }
}

/// Snippets split by whether the viewer owns them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnippetListing {
    pub mine: Vec<SnippetSummary>,
    pub others: Vec<SnippetSummary>,
}

impl SnippetListing {
    /// Partition `snippets`, keeping their order within each half.
    pub fn partition(snippets: &[Snippet], viewer: Option<&UserId>) -> Self {
        let (mine, others): (Vec<&Snippet>, Vec<&Snippet>) = snippets
            .iter()
            .partition(|snippet| viewer.is_some_and(|user| snippet.is_owned_by(user)));
        Self {
            mine: mine.into_iter().map(SnippetSummary::from).collect(),
            others: others.into_iter().map(SnippetSummary::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::{fixture, rstest};

    fn snippet(owner: UserId, text: &str) -> Snippet {
        let now = Utc::now();
        Snippet::new(SnippetDraft {
            id: SnippetId::random(),
            description: Description::new(text).expect("description"),
            owner,
            author: Username::new("someone").expect("username"),
            created_at: now,
            updated_at: now,
        })
    }

    #[fixture]
    fn owners() -> (UserId, UserId) {
        (UserId::random(), UserId::random())
    }

    #[rstest]
    #[case("")]
    #[case(" \t\n")]
    fn blank_description_is_rejected(#[case] text: &str) {
        assert_eq!(
            Description::new(text),
            Err(SnippetValidationError::EmptyDescription)
        );
    }

    #[rstest]
    #[case("nope")]
    #[case("")]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6 ")]
    fn malformed_snippet_ids_are_rejected(#[case] raw: &str) {
        assert_eq!(SnippetId::new(raw), Err(SnippetValidationError::InvalidId));
    }

    #[rstest]
    fn updated_at_never_precedes_created_at() {
        let now = Utc::now();
        let snippet = Snippet::new(SnippetDraft {
            id: SnippetId::random(),
            description: Description::new("x").expect("description"),
            owner: UserId::random(),
            author: Username::new("ada").expect("username"),
            created_at: now,
            updated_at: now - Duration::seconds(5),
        });
        assert_eq!(snippet.updated_at(), snippet.created_at());
    }

    #[rstest]
    fn partition_splits_by_viewer(owners: (UserId, UserId)) {
        let (alice, bob) = owners;
        let snippets = vec![snippet(alice, "a1"), snippet(bob, "b1"), snippet(alice, "a2")];

        let listing = SnippetListing::partition(&snippets, Some(&alice));
        let mine: Vec<_> = listing.mine.iter().map(|s| s.description.as_str()).collect();
        let others: Vec<_> = listing.others.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(mine, ["a1", "a2"]);
        assert_eq!(others, ["b1"]);
    }

    #[rstest]
    fn anonymous_viewer_sees_everything_as_others(owners: (UserId, UserId)) {
        let (alice, bob) = owners;
        let snippets = vec![snippet(alice, "a1"), snippet(bob, "b1")];

        let listing = SnippetListing::partition(&snippets, None);
        assert!(listing.mine.is_empty());
        assert_eq!(listing.others.len(), 2);
    }
}
