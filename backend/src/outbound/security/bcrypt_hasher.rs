//! bcrypt implementation of the `PasswordHasher` port.
//!
//! Hashing is CPU bound; both operations run on Tokio's blocking pool so the
//! actix workers keep serving requests.

use async_trait::async_trait;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Work factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 8;

/// Rejected work factor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("bcrypt cost must be between {min} and {max}, got {cost}")]
pub struct BcryptCostError {
    pub cost: u32,
    pub min: u32,
    pub max: u32,
}

/// Salted bcrypt hashing with a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub const MIN_COST: u32 = 4;
    pub const MAX_COST: u32 = 31;

    /// # Errors
    ///
    /// Returns [`BcryptCostError`] when `cost` is outside bcrypt's range.
    pub fn new(cost: u32) -> Result<Self, BcryptCostError> {
        if !(Self::MIN_COST..=Self::MAX_COST).contains(&cost) {
            return Err(BcryptCostError {
                cost,
                min: Self::MIN_COST,
                max: Self::MAX_COST,
            });
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

fn join_error(err: tokio::task::JoinError) -> PasswordHashError {
    PasswordHashError::backend(format!("hashing task aborted: {err}"))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let cost = self.cost;
        let password = zeroize::Zeroizing::new(password.to_owned());
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password.as_bytes(), cost))
            .await
            .map_err(join_error)?
            .map_err(|err| PasswordHashError::backend(err.to_string()))?;
        PasswordHash::new(hashed).map_err(|err| PasswordHashError::backend(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let hash = hash.as_ref().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password.as_bytes(), &hash))
            .await
            .map_err(join_error)?
            .map_err(|err| PasswordHashError::backend(err.to_string()))
    }
}
