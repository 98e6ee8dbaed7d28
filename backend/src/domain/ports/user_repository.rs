//! Port abstraction for user persistence adapters and their errors.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::user::{EmailAddress, User, UserId};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserStoreError {
        /// Repository connection could not be established.
        Connection { message: String } => "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// A write violated the username/email uniqueness constraint.
        DuplicateIdentity { message: String } => "user store uniqueness conflict: {message}",
        /// The store rejected the record at the schema level.
        Validation { message: String } => "user store rejected the record: {message}",
    }
}

/// Persistence of user identity records, enforcing uniqueness of username
/// and email.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    ///
    /// Fails with [`UserStoreError::DuplicateIdentity`] when the username or
    /// email is already taken.
    async fn create(&self, user: &User) -> Result<(), UserStoreError>;

    /// Fetch a user by exact (normalised) email.
    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Option<User>, UserStoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError>;
}

/// In-memory `UserRepository` used in fixture mode and by tests.
///
/// Enforces the same uniqueness semantics as the SQL adapter.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Number of stored records; lets tests assert that no write happened.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = self.lock();
        let taken = users.iter().any(|existing| {
            existing.username() == user.username() || existing.email() == user.email()
        });
        if taken {
            return Err(UserStoreError::duplicate_identity(
                "username or email already used",
            ));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserStoreError> {
        Ok(self
            .lock()
            .iter()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        Ok(self.lock().iter().find(|user| user.id() == id).cloned())
    }
}
