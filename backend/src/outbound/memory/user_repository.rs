//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::User;
use crate::domain::ports::{UserPersistenceError, UserRepository};

/// Accounts keyed by user name.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    by_username: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> UserPersistenceError {
    UserPersistenceError::query("user store lock poisoned")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.by_username.write().map_err(|_| poisoned())?;
        let key = user.username().as_ref();
        if users.contains_key(key) {
            return Err(UserPersistenceError::duplicate_username(key));
        }
        users.insert(key.to_owned(), user.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.by_username.read().map_err(|_| poisoned())?;
        Ok(users.get(username).cloned())
    }
}
