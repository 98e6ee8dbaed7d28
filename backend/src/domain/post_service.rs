//! Post creation and retrieval use-cases.
//!
//! `PostService` re-validates at write time that the creator still exists
//! (the guard already proved a session id; this closes the
//! referential-integrity gap alongside the SQL foreign key), stores the
//! optional picture, and maps lookups.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::deadline::store_call;
use super::error::Error;
use super::ports::{MediaStore, PostRepository, UserRepository};
use super::post::{Post, PostDraft, PostId};
use super::store_errors::{map_media_error, map_post_store_error, map_user_store_error};
use super::user::UserId;

/// Orchestrates post persistence and the creator existence check.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    media: Arc<dyn MediaStore>,
}

impl PostService {
    /// Create a new service over the given ports.
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            posts,
            users,
            media,
        }
    }

    /// Persist a new post for the given creator.
    pub async fn create(&self, creator: &UserId, draft: PostDraft) -> Result<Post, Error> {
        let known = store_call(self.users.find_by_id(creator), map_user_store_error)
            .await?
            .is_some();
        if !known {
            return Err(Error::unauthorized("login required"));
        }

        let (content, pic_name, image) = draft.into_parts();
        let pic_path = match image {
            Some(upload) => {
                Some(store_call(self.media.store(&upload), map_media_error).await?)
            }
            None => None,
        };

        let post = Post::new(
            PostId::random(),
            content,
            creator.clone(),
            pic_path,
            pic_name,
            Utc::now(),
        );
        store_call(self.posts.create(&post), map_post_store_error).await?;
        info!(post = %post.id(), creator = %creator, "post created");
        Ok(post)
    }

    /// All posts in creation order.
    pub async fn list(&self) -> Result<Vec<Post>, Error> {
        store_call(self.posts.list_all(), map_post_store_error).await
    }

    /// Fetch a single post by id.
    pub async fn get(&self, id: &PostId) -> Result<Post, Error> {
        store_call(self.posts.find_by_id(id), map_post_store_error)
            .await?
            .ok_or_else(|| Error::not_found("post not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::media::ImageUpload;
    use crate::domain::ports::{
        InMemoryMediaStore, InMemoryPostRepository, InMemoryUserRepository,
    };
    use crate::domain::user::{EmailAddress, PasswordHashString, User, Username};

    struct Harness {
        posts: Arc<InMemoryPostRepository>,
        users: Arc<InMemoryUserRepository>,
        media: Arc<InMemoryMediaStore>,
        service: PostService,
    }

    fn harness() -> Harness {
        let posts = Arc::new(InMemoryPostRepository::default());
        let users = Arc::new(InMemoryUserRepository::default());
        let media = Arc::new(InMemoryMediaStore::default());
        let service = PostService::new(posts.clone(), users.clone(), media.clone());
        Harness {
            posts,
            users,
            media,
            service,
        }
    }

    async fn seeded_user(h: &Harness) -> UserId {
        let user = User::new(
            UserId::random(),
            Username::new("ada").expect("username"),
            EmailAddress::new("ada@example.com").expect("email"),
            PasswordHashString::new("$2b$10$hash").expect("hash"),
            None,
        );
        h.users.create(&user).await.expect("seed user");
        user.id().clone()
    }

    fn draft(content: &str) -> PostDraft {
        PostDraft::try_from_parts(content, None, None).expect("valid draft")
    }

    #[tokio::test]
    async fn create_links_the_post_to_its_creator() {
        let h = harness();
        let creator = seeded_user(&h).await;

        let post = h
            .service
            .create(&creator, draft("hello board"))
            .await
            .expect("create succeeds");

        assert_eq!(post.creator_id(), &creator);
        assert_eq!(h.posts.len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_a_vanished_creator() {
        let h = harness();
        let err = h
            .service
            .create(&UserId::random(), draft("hello"))
            .await
            .expect_err("unknown creator must fail");
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert!(h.posts.is_empty());
    }

    #[tokio::test]
    async fn create_stores_the_image_and_records_its_path() {
        let h = harness();
        let creator = seeded_user(&h).await;
        let upload = ImageUpload::from_base64("cat.png", "aGVsbG8=").expect("upload");
        let with_image = PostDraft::try_from_parts("look", Some("cat".to_owned()), Some(upload))
            .expect("valid draft");

        let post = h
            .service
            .create(&creator, with_image)
            .await
            .expect("create succeeds");

        assert_eq!(h.media.stored_count(), 1);
        let path = post.pic_path().expect("path recorded");
        assert!(path.as_ref().ends_with(".png"));
        assert_eq!(post.pic_name(), Some("cat"));
    }

    #[tokio::test]
    async fn list_returns_creation_order_and_is_idempotent() {
        let h = harness();
        let creator = seeded_user(&h).await;
        h.service
            .create(&creator, draft("first"))
            .await
            .expect("first");
        h.service
            .create(&creator, draft("second"))
            .await
            .expect("second");

        let listed = h.service.list().await.expect("list");
        let contents: Vec<_> = listed.iter().map(|p| p.content().to_string()).collect();
        assert_eq!(contents, vec!["first", "second"]);

        let again = h.service.list().await.expect("list again");
        assert_eq!(listed, again);
    }

    #[tokio::test]
    async fn get_distinguishes_present_and_missing() {
        let h = harness();
        let creator = seeded_user(&h).await;
        let created = h
            .service
            .create(&creator, draft("findable"))
            .await
            .expect("create");

        let fetched = h.service.get(created.id()).await.expect("get");
        assert_eq!(fetched, created);

        let err = h
            .service
            .get(&PostId::random())
            .await
            .expect_err("missing post");
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
