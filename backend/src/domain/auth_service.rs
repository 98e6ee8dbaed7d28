//! Signup and login use-cases.
//!
//! `AuthService` orchestrates the credential hasher, the user repository,
//! and the media store. Field validation happens earlier, in the form
//! constructors; this service owns hashing, uniqueness mapping, and the
//! credential checks.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use super::auth::{LoginCredentials, SignupForm};
use super::deadline::store_call;
use super::error::Error;
use super::ports::{CredentialHasher, MediaStore, UserRepository};
use super::store_errors::{map_hash_error, map_media_error, map_user_store_error};
use super::user::{EmailAddress, User, UserId};

/// Orchestrates signup and login against the hasher, user store, and media
/// store ports.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    media: Arc<dyn MediaStore>,
}

fn unknown_email_error() -> Error {
    // Unknown email and wrong password deliberately report as distinct
    // failures.
    Error::unauthorized("email is not registered")
        .with_details(json!({ "code": "unknown_email" }))
}

fn incorrect_password_error() -> Error {
    Error::unauthorized("incorrect password")
        .with_details(json!({ "code": "incorrect_password" }))
}

impl AuthService {
    /// Create a new service over the given ports.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            users,
            hasher,
            media,
        }
    }

    /// Create an account from a validated signup form.
    ///
    /// Hashes the password, stores the optional image, and creates the user
    /// record. Establishes no session; the client logs in afterwards.
    pub async fn signup(&self, form: SignupForm) -> Result<User, Error> {
        let (username, email, password, image) = form.into_parts();

        let password_hash = self
            .hasher
            .hash(password.as_str())
            .await
            .map_err(map_hash_error)?;

        let image_url = match image {
            Some(upload) => {
                Some(store_call(self.media.store(&upload), map_media_error).await?)
            }
            None => None,
        };

        let user = User::new(UserId::random(), username, email, password_hash, image_url);
        store_call(self.users.create(&user), map_user_store_error).await?;
        info!(user = %user.id(), "user signed up");
        Ok(user)
    }

    /// Authenticate credentials and return the matching user.
    ///
    /// The HTTP handler is responsible for persisting the session.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        // A malformed email cannot be registered, so it reports the same way
        // as an unknown one.
        let Ok(email) = EmailAddress::new(credentials.email()) else {
            return Err(unknown_email_error());
        };

        let user = store_call(self.users.find_by_email(&email), map_user_store_error)
            .await?
            .ok_or_else(unknown_email_error)?;

        let verified = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_hash_error)?;
        if !verified {
            return Err(incorrect_password_error());
        }

        info!(user = %user.id(), "user logged in");
        Ok(user)
    }

    /// Fetch the live record for the session subject.
    ///
    /// A session id that no longer resolves reports as unauthenticated.
    pub async fn profile(&self, id: &UserId) -> Result<User, Error> {
        store_call(self.users.find_by_id(id), map_user_store_error)
            .await?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}
