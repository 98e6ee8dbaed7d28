//! Port abstraction for post persistence adapters and their errors.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::post::{Post, PostId};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostStoreError {
        /// Repository connection could not be established.
        Connection { message: String } => "post store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post store query failed: {message}",
        /// The creator reference did not resolve to a stored user.
        UnknownCreator { message: String } => "post creator does not exist: {message}",
    }
}

/// Persistence of post records, each linked to a creating user.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post record.
    async fn create(&self, post: &Post) -> Result<(), PostStoreError>;

    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostStoreError>;

    /// All posts in creation order.
    async fn list_all(&self) -> Result<Vec<Post>, PostStoreError>;
}

/// In-memory `PostRepository` used in fixture mode and by tests.
///
/// Preserves insertion order, matching the SQL adapter's
/// `ORDER BY created_at` listing.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
}

impl InMemoryPostRepository {
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

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Post>> {
        self.posts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: &Post) -> Result<(), PostStoreError> {
        self.lock().push(post.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostStoreError> {
        Ok(self.lock().iter().find(|post| post.id() == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostStoreError> {
        Ok(self.lock().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::PostContent;
    use crate::domain::user::UserId;
    use chrono::Utc;

    fn post(content: &str) -> Post {
        Post::new(
            PostId::random(),
            PostContent::new(content).expect("content"),
            UserId::random(),
            None,
            None,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn listing_preserves_insertion_order() {
        let repo = InMemoryPostRepository::default();
        let first = post("first");
        let second = post("second");
        repo.create(&first).await.expect("create");
        repo.create(&second).await.expect("create");

        let listed = repo.list_all().await.expect("list");
        assert_eq!(listed, vec![first, second]);

        // Listing twice with no intervening writes returns the same sequence.
        let again = repo.list_all().await.expect("list again");
        assert_eq!(listed, again);
    }

    #[tokio::test]
    async fn find_by_id_distinguishes_present_and_missing() {
        let repo = InMemoryPostRepository::default();
        let stored = post("hello");
        repo.create(&stored).await.expect("create");

        let found = repo.find_by_id(stored.id()).await.expect("find");
        assert_eq!(found, Some(stored));
        assert!(
            repo.find_by_id(&PostId::random())
                .await
                .expect("find")
                .is_none()
        );
    }
}
