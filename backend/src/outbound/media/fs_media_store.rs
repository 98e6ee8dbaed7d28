//! Filesystem-backed `MediaStore` adapter.
//!
//! Persists decoded image bytes under a configured root directory using a
//! fresh UUID name (plus the sanitised original extension) and returns the
//! relative `media/...` path used as the durable reference.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::domain::ports::{MediaStore, MediaStoreError};
use crate::domain::{ImageUpload, MediaPath};

/// Uploads larger than this are rejected.
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// `MediaStore` implementation writing files below a root directory.
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn store(&self, upload: &ImageUpload) -> Result<MediaPath, MediaStoreError> {
        if upload.data().len() > MAX_UPLOAD_BYTES {
            return Err(MediaStoreError::rejected(format!(
                "image exceeds the {MAX_UPLOAD_BYTES} byte limit"
            )));
        }

        let file_name = match upload.extension() {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };

        fs::create_dir_all(&self.root)
            .await
            .map_err(|err| MediaStoreError::io(err.to_string()))?;
        fs::write(self.root.join(&file_name), upload.data())
            .await
            .map_err(|err| MediaStoreError::io(err.to_string()))?;

        MediaPath::new(format!("media/{file_name}"))
            .map_err(|err| MediaStoreError::io(err.to_string()))
    }
}
