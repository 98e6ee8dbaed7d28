//! Port abstraction for one-way password hashing and verification.

use async_trait::async_trait;

use crate::domain::user::PasswordHashString;

use super::macros::define_port_error;

define_port_error! {
    /// Failures raised by credential hasher adapters.
    pub enum CredentialHashError {
        /// Hash derivation failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// Verification against a stored hash failed to run.
        Verify { message: String } => "password verification failed: {message}",
    }
}

/// One-way salted hashing of passwords plus verification.
///
/// Implementations must never retain or log the raw password.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Derive a salted hash from the raw password.
    async fn hash(&self, password: &str) -> Result<PasswordHashString, CredentialHashError>;

    /// Check a raw password against a stored hash.
    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHashString,
    ) -> Result<bool, CredentialHashError>;
}
