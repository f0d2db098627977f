//! Credential hashing adapters.

mod bcrypt_hasher;

pub use bcrypt_hasher::{BcryptCostError, BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
