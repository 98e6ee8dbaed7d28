//! Credential hashing adapters.

mod bcrypt_hasher;

pub use bcrypt_hasher::{BcryptCredentialHasher, HASH_ROUNDS};
