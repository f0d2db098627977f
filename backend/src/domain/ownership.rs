//! Ownership gate shared by every snippet read-for-mutation path.
//!
//! Anonymous viewers are turned away before any lookup so that a missing id
//! and a gated id look identical to them.

use super::{Error, Snippet, SnippetId, UserId};

pub(crate) const SNIPPET_NOT_FOUND: &str = "snippet not found";
pub(crate) const SNIPPET_FORBIDDEN: &str = "you do not own this snippet";

/// Reject anonymous viewers up front.
pub(crate) fn require_viewer(viewer: Option<&UserId>) -> Result<&UserId, Error> {
    viewer.ok_or_else(|| Error::not_found(SNIPPET_NOT_FOUND))
}

/// Resolve a looked-up record against the acting identity.
pub(crate) fn authorise(
    id: &SnippetId,
    found: Option<Snippet>,
    viewer: &UserId,
) -> Result<Snippet, Error> {
    let snippet = found.ok_or_else(|| {
        tracing::debug!(snippet_id = %id, "snippet lookup missed");
        Error::not_found(SNIPPET_NOT_FOUND)
    })?;
    if !snippet.is_owned_by(viewer) {
        tracing::info!(snippet_id = %id, user_id = %viewer, "ownership check failed");
        return Err(Error::forbidden(SNIPPET_FORBIDDEN));
    }
    Ok(snippet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Description, ErrorCode, SnippetDraft, Username};
    use chrono::Utc;
    use rstest::rstest;

    fn owned_by(owner: UserId) -> Snippet {
        let now = Utc::now();
        Snippet::new(SnippetDraft {
            id: SnippetId::random(),
            description: Description::new("buy milk").expect("description"),
            owner,
            author: Username::new("ada").expect("username"),
            created_at: now,
            updated_at: now,
        })
    }

    #[rstest]
    fn anonymous_viewer_is_not_found() {
        let err = require_viewer(None).expect_err("anonymous");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    fn missing_record_is_not_found() {
        let err = authorise(&SnippetId::random(), None, &UserId::random()).expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    fn foreign_record_is_forbidden() {
        let snippet = owned_by(UserId::random());
        let id = *snippet.id();
        let err = authorise(&id, Some(snippet), &UserId::random()).expect_err("foreign");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    fn owner_passes() {
        let owner = UserId::random();
        let snippet = owned_by(owner);
        let id = *snippet.id();
        let passed = authorise(&id, Some(snippet.clone()), &owner).expect("owner");
        assert_eq!(passed, snippet);
    }
}
