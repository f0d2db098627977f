//! One-shot status messages carried across a redirect.

use serde::{Deserialize, Serialize};

/// Banner style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Danger,
}

/// Message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    #[serde(rename = "type")]
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.into(),
        }
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Danger,
            text: text.into(),
        }
    }
}

pub(crate) const SNIPPET_CREATED: &str = "The snippet was created successfully.";
pub(crate) const SNIPPET_UPDATED: &str = "The snippet was updated successfully.";
pub(crate) const SNIPPET_NOT_UPDATED: &str = "The snippet was not updated.";
pub(crate) const SNIPPET_DELETED: &str = "The snippet was deleted successfully.";
pub(crate) const SNIPPET_NOT_DELETED: &str = "The snippet was not deleted.";
pub(crate) const USER_REGISTERED: &str = "The user was registered successfully.";
pub(crate) const LOGGED_IN: &str = "You logged in successfully.";
pub(crate) const LOGGED_OUT: &str = "You logged out successfully.";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialises_with_type_tag() {
        let value = serde_json::to_value(Flash::danger("nope")).expect("serialise");
        assert_eq!(value, json!({ "type": "danger", "text": "nope" }));
    }
}
