//! Post content model.
//!
//! A post is immutable after creation: text content, an optional picture
//! reference, the creating user, and a creation timestamp that fixes the
//! listing order.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::media::{ImageUpload, MediaPath};
use super::user::UserId;

/// Validation errors returned by the post constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    /// Post id was not a valid UUID.
    InvalidId,
    /// Content was absent or blank.
    MissingContent,
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "post id must be a valid UUID"),
            Self::MissingContent => write!(f, "please provide the content"),
        }
    }
}

impl std::error::Error for PostValidationError {}

/// Stable post identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostId(Uuid);

impl PostId {
    /// Validate and construct a [`PostId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, PostValidationError> {
        let parsed =
            Uuid::parse_str(id.as_ref().trim()).map_err(|_| PostValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`PostId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Construct from an already-validated UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PostId> for String {
    fn from(value: PostId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for PostId {
    type Error = PostValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-empty post body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostContent(String);

impl PostContent {
    /// Validate and construct [`PostContent`] from owned input.
    pub fn new(content: impl Into<String>) -> Result<Self, PostValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(PostValidationError::MissingContent);
        }
        Ok(Self(content))
    }
}

impl AsRef<str> for PostContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PostContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PostContent> for String {
    fn from(value: PostContent) -> Self {
        value.0
    }
}

impl TryFrom<String> for PostContent {
    type Error = PostValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A stored post.
///
/// ## Invariants
/// - `creator_id` references an existing user; enforced by a foreign key in
///   the SQL store and re-validated at write time by the post service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: PostId,
    content: PostContent,
    creator_id: UserId,
    pic_path: Option<MediaPath>,
    pic_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl Post {
    /// Build a new [`Post`] from validated components.
    #[must_use]
    pub fn new(
        id: PostId,
        content: PostContent,
        creator_id: UserId,
        pic_path: Option<MediaPath>,
        pic_name: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content,
            creator_id,
            pic_path,
            pic_name,
            created_at,
        }
    }

    /// Stable post identifier.
    #[must_use]
    pub fn id(&self) -> &PostId {
        &self.id
    }

    /// Post body text.
    #[must_use]
    pub fn content(&self) -> &PostContent {
        &self.content
    }

    /// Identifier of the creating user.
    #[must_use]
    pub fn creator_id(&self) -> &UserId {
        &self.creator_id
    }

    /// Optional stored picture path.
    #[must_use]
    pub fn pic_path(&self) -> Option<&MediaPath> {
        self.pic_path.as_ref()
    }

    /// Optional caller-supplied picture name.
    #[must_use]
    pub fn pic_name(&self) -> Option<&str> {
        self.pic_name.as_deref()
    }

    /// Creation timestamp; fixes the listing order.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A validated request to create a post, before persistence.
#[derive(Debug)]
pub struct PostDraft {
    content: PostContent,
    pic_name: Option<String>,
    image: Option<ImageUpload>,
}

impl PostDraft {
    /// Construct a draft from raw request inputs.
    pub fn try_from_parts(
        content: &str,
        pic_name: Option<String>,
        image: Option<ImageUpload>,
    ) -> Result<Self, PostValidationError> {
        let content = PostContent::new(content)?;
        Ok(Self {
            content,
            pic_name,
            image,
        })
    }

    /// Consume the draft into its validated parts.
    #[must_use]
    pub fn into_parts(self) -> (PostContent, Option<String>, Option<ImageUpload>) {
        (self.content, self.pic_name, self.image)
    }
}

/// Wire projection of a [`Post`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// Stable post identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Post body text.
    pub content: String,
    /// Identifier of the creating user.
    pub creator_id: String,
    /// Optional stored picture path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pic_path: Option<String>,
    /// Optional caller-supplied picture name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pic_name: Option<String>,
    /// Creation timestamp.
    #[schema(value_type = String, example = "2025-07-01T12:00:00Z")]
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostRecord {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id().to_string(),
            content: post.content().to_string(),
            creator_id: post.creator_id().to_string(),
            pic_path: post.pic_path().map(ToString::to_string),
            pic_name: post.pic_name().map(ToOwned::to_owned),
            created_at: post.created_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn draft_rejects_blank_content(#[case] content: &str) {
        let err = PostDraft::try_from_parts(content, None, None).expect_err("blank content");
        assert_eq!(err, PostValidationError::MissingContent);
    }

    #[test]
    fn draft_keeps_the_picture_name() {
        let draft = PostDraft::try_from_parts("hello", Some("cat pic".to_owned()), None)
            .expect("valid draft");
        let (content, pic_name, image) = draft.into_parts();
        assert_eq!(content.as_ref(), "hello");
        assert_eq!(pic_name.as_deref(), Some("cat pic"));
        assert!(image.is_none());
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn post_id_rejects_invalid_input(#[case] id: &str) {
        let err = PostId::new(id).expect_err("invalid id must fail");
        assert_eq!(err, PostValidationError::InvalidId);
    }

    #[test]
    fn record_projects_all_fields() {
        let creator = UserId::random();
        let post = Post::new(
            PostId::random(),
            PostContent::new("hello").expect("content"),
            creator.clone(),
            None,
            Some("pic".to_owned()),
            Utc::now(),
        );
        let record = PostRecord::from(&post);
        assert_eq!(record.creator_id, creator.to_string());
        assert_eq!(record.content, "hello");
        assert!(record.pic_path.is_none());
        assert_eq!(record.pic_name.as_deref(), Some("pic"));
    }
}
