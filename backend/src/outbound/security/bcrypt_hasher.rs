//! bcrypt-backed `CredentialHasher` adapter.
//!
//! bcrypt generates a random per-record salt and embeds it in the PHC
//! string, so hashing and verification need no extra state. Both operations
//! are CPU-bound and run on the blocking pool to keep Actix workers free.

use async_trait::async_trait;
use tokio::task::spawn_blocking;
use zeroize::Zeroizing;

use crate::domain::PasswordHashString;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Fixed bcrypt cost factor ("rounds").
pub const HASH_ROUNDS: u32 = 10;

/// `CredentialHasher` implementation backed by the `bcrypt` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BcryptCredentialHasher;

#[async_trait]
impl CredentialHasher for BcryptCredentialHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHashString, CredentialHashError> {
        let password = Zeroizing::new(password.to_owned());
        let hashed = spawn_blocking(move || bcrypt::hash(password.as_str(), HASH_ROUNDS))
            .await
            .map_err(|err| CredentialHashError::hash(err.to_string()))?
            .map_err(|err| CredentialHashError::hash(err.to_string()))?;
        PasswordHashString::new(hashed).map_err(|err| CredentialHashError::hash(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHashString,
    ) -> Result<bool, CredentialHashError> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.as_str().to_owned();
        spawn_blocking(move || bcrypt::verify(password.as_str(), &hash))
            .await
            .map_err(|err| CredentialHashError::verify(err.to_string()))?
            .map_err(|err| CredentialHashError::verify(err.to_string()))
    }
}
