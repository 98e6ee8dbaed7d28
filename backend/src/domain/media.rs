//! Media primitives: uploaded image payloads and durable media paths.
//!
//! Image bytes arrive base64-encoded inside JSON request bodies; the media
//! store collaborator persists them and hands back a [`MediaPath`] that is
//! safe to serve as a relative URL.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// Validation errors for media primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaValidationError {
    /// Upload carried no file name.
    EmptyFileName,
    /// Upload payload was not valid base64.
    InvalidEncoding,
    /// Decoded upload carried no bytes.
    EmptyData,
    /// A media path must be a non-empty relative path.
    EmptyPath,
    /// Media paths must not escape the media root.
    PathEscapesRoot,
}

impl fmt::Display for MediaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFileName => write!(f, "image file name must not be empty"),
            Self::InvalidEncoding => write!(f, "image data must be base64 encoded"),
            Self::EmptyData => write!(f, "image data must not be empty"),
            Self::EmptyPath => write!(f, "media path must not be empty"),
            Self::PathEscapesRoot => write!(f, "media path must stay below the media root"),
        }
    }
}

impl std::error::Error for MediaValidationError {}

/// Durable reference path returned by the media store.
///
/// ## Invariants
/// - Non-empty, relative (no leading `/`), and free of `..` segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediaPath(String);

impl MediaPath {
    /// Validate and construct a [`MediaPath`] from owned input.
    pub fn new(path: impl Into<String>) -> Result<Self, MediaValidationError> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(MediaValidationError::EmptyPath);
        }
        if path.starts_with('/') || path.split('/').any(|segment| segment == "..") {
            return Err(MediaValidationError::PathEscapesRoot);
        }
        Ok(Self(path))
    }
}

impl AsRef<str> for MediaPath {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MediaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<MediaPath> for String {
    fn from(value: MediaPath) -> Self {
        value.0
    }
}

impl TryFrom<String> for MediaPath {
    type Error = MediaValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A decoded image upload: original file name plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    data: Vec<u8>,
}

impl ImageUpload {
    /// Decode a base64 payload into an upload.
    pub fn from_base64(
        file_name: impl Into<String>,
        encoded: &str,
    ) -> Result<Self, MediaValidationError> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(MediaValidationError::EmptyFileName);
        }
        let data = BASE64
            .decode(encoded.trim())
            .map_err(|_| MediaValidationError::InvalidEncoding)?;
        if data.is_empty() {
            return Err(MediaValidationError::EmptyData);
        }
        Ok(Self { file_name, data })
    }

    /// Original file name supplied by the client.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// Decoded image bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// File extension usable in a stored name: lowercase alphanumerics only,
    /// at most eight characters.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let ext = self.file_name.rsplit_once('.')?.1;
        if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", MediaValidationError::EmptyPath)]
    #[case("   ", MediaValidationError::EmptyPath)]
    #[case("/etc/passwd", MediaValidationError::PathEscapesRoot)]
    #[case("media/../secret", MediaValidationError::PathEscapesRoot)]
    fn media_path_rejects_invalid_input(
        #[case] path: &str,
        #[case] expected: MediaValidationError,
    ) {
        let err = MediaPath::new(path).expect_err("invalid path must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn media_path_accepts_relative_paths() {
        let path = MediaPath::new("media/abc.png").expect("valid path");
        assert_eq!(path.as_ref(), "media/abc.png");
    }

    #[test]
    fn upload_round_trips_base64() {
        let upload = ImageUpload::from_base64("cat.PNG", "aGVsbG8=").expect("valid upload");
        assert_eq!(upload.data(), b"hello");
        assert_eq!(upload.extension().as_deref(), Some("png"));
    }

    #[rstest]
    #[case("", "aGVsbG8=", MediaValidationError::EmptyFileName)]
    #[case("cat.png", "not base64!!", MediaValidationError::InvalidEncoding)]
    #[case("cat.png", "", MediaValidationError::EmptyData)]
    fn upload_rejects_invalid_input(
        #[case] file_name: &str,
        #[case] encoded: &str,
        #[case] expected: MediaValidationError,
    ) {
        let err = ImageUpload::from_base64(file_name, encoded).expect_err("must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("archive.tar.gz", Some("gz"))]
    #[case("noextension", None)]
    #[case("weird.p@g", None)]
    fn extension_is_sanitised(#[case] file_name: &str, #[case] expected: Option<&str>) {
        let upload = ImageUpload::from_base64(file_name, "aGVsbG8=").expect("valid upload");
        assert_eq!(upload.extension().as_deref(), expected);
    }
}
