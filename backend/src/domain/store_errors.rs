//! Shared mapping from port failures to the HTTP-safe domain error payload.

use serde_json::json;

use super::error::Error;
use super::ports::{CredentialHashError, MediaStoreError, PostStoreError, UserStoreError};

/// Canonical uniqueness-conflict message, distinct from generic validation
/// failure.
pub(crate) const DUPLICATE_IDENTITY_MESSAGE: &str =
    "username and email need to be unique; either username or email is already used";

pub(crate) fn map_user_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => Error::service_unavailable(message),
        UserStoreError::Query { message } => Error::internal(message),
        UserStoreError::DuplicateIdentity { .. } => Error::conflict(DUPLICATE_IDENTITY_MESSAGE),
        UserStoreError::Validation { message } => {
            Error::invalid_request(message).with_details(json!({ "code": "validation_failed" }))
        }
    }
}

pub(crate) fn map_post_store_error(error: PostStoreError) -> Error {
    match error {
        PostStoreError::Connection { message } => Error::service_unavailable(message),
        PostStoreError::Query { message } => Error::internal(message),
        // The session subject vanished between the guard and the write.
        PostStoreError::UnknownCreator { .. } => Error::unauthorized("login required"),
    }
}

pub(crate) fn map_media_error(error: MediaStoreError) -> Error {
    match error {
        MediaStoreError::Rejected { message } => {
            Error::invalid_request(message).with_details(json!({ "code": "invalid_image" }))
        }
        MediaStoreError::Io { message } => Error::internal(message),
    }
}

pub(crate) fn map_hash_error(error: CredentialHashError) -> Error {
    match error {
        CredentialHashError::Hash { message } | CredentialHashError::Verify { message } => {
            Error::internal(message)
        }
    }
}
