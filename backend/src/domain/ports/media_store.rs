//! Port abstraction for the image upload collaborator.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::media::{ImageUpload, MediaPath};

use super::macros::define_port_error;

define_port_error! {
    /// Failures raised by media store adapters.
    pub enum MediaStoreError {
        /// The upload was rejected (size, type, or name).
        Rejected { message: String } => "media upload rejected: {message}",
        /// The backing storage failed.
        Io { message: String } => "media store failure: {message}",
    }
}

/// Stores an uploaded image and returns a durable reference path.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist the upload and return its reference path.
    async fn store(&self, upload: &ImageUpload) -> Result<MediaPath, MediaStoreError>;
}

/// In-memory `MediaStore` used in tests.
///
/// Records each stored upload and hands back a path shaped like the
/// filesystem adapter's output.
#[derive(Debug, Default)]
pub struct InMemoryMediaStore {
    stored: Mutex<Vec<MediaPath>>,
}

impl InMemoryMediaStore {
    /// Number of stored uploads.
    #[must_use]
    pub fn stored_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<MediaPath>> {
        self.stored.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn store(&self, upload: &ImageUpload) -> Result<MediaPath, MediaStoreError> {
        let name = match upload.extension() {
            Some(ext) => format!("media/{}.{ext}", Uuid::new_v4()),
            None => format!("media/{}", Uuid::new_v4()),
        };
        let path = MediaPath::new(name).map_err(|err| MediaStoreError::io(err.to_string()))?;
        self.lock().push(path.clone());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_returns_a_fresh_relative_path() {
        let store = InMemoryMediaStore::default();
        let upload = ImageUpload::from_base64("cat.png", "aGVsbG8=").expect("upload");

        let first = store.store(&upload).await.expect("store");
        let second = store.store(&upload).await.expect("store");

        assert!(first.as_ref().starts_with("media/"));
        assert!(first.as_ref().ends_with(".png"));
        assert_ne!(first, second);
        assert_eq!(store.stored_count(), 2);
    }
}
