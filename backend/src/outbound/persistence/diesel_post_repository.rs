//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Listing uses `ORDER BY created_at, id` so the sequence is creation order
//! and stable across calls. The `creator_id` foreign key backs the
//! write-time existence check performed by the post service; a violation
//! still maps to `UnknownCreator` in case of a race.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{PostRepository, PostStoreError};
use crate::domain::{MediaPath, Post, PostContent, PostId, UserId};

use super::models::{NewPostRow, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PostStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> PostStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            PostStoreError::unknown_creator(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PostStoreError::connection("database connection error")
        }
        DieselError::NotFound => PostStoreError::query("record not found"),
        _ => PostStoreError::query("database error"),
    }
}

/// Convert a database row to a domain [`Post`].
fn row_to_post(row: PostRow) -> Result<Post, PostStoreError> {
    let content = PostContent::new(row.content)
        .map_err(|err| PostStoreError::query(format!("stored content invalid: {err}")))?;
    let pic_path = row
        .pic_path
        .map(MediaPath::new)
        .transpose()
        .map_err(|err| PostStoreError::query(format!("stored pic path invalid: {err}")))?;

    Ok(Post::new(
        PostId::from_uuid(row.id),
        content,
        UserId::from_uuid(row.creator_id),
        pic_path,
        row.pic_name,
        row.created_at,
    ))
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(&self, post: &Post) -> Result<(), PostStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewPostRow {
            id: *post.id().as_uuid(),
            content: post.content().as_ref(),
            creator_id: *post.creator_id().as_uuid(),
            pic_path: post.pic_path().map(AsRef::as_ref),
            pic_name: post.pic_name(),
            created_at: post.created_at(),
        };

        diesel::insert_into(posts::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PostRow> = posts::table
            .filter(posts::id.eq(id.as_uuid()))
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PostRow> = posts::table
            .select(PostRow::as_select())
            .order_by((posts::created_at.asc(), posts::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_post).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn row_conversion_produces_a_domain_post() {
        let creator = Uuid::new_v4();
        let row = PostRow {
            id: Uuid::new_v4(),
            content: "hello".to_owned(),
            creator_id: creator,
            pic_path: Some("media/cat.png".to_owned()),
            pic_name: Some("cat".to_owned()),
            created_at: Utc::now(),
        };
        let post = row_to_post(row).expect("valid row");
        assert_eq!(post.content().as_ref(), "hello");
        assert_eq!(post.creator_id().as_uuid(), &creator);
        assert_eq!(post.pic_name(), Some("cat"));
    }

    #[test]
    fn pool_errors_map_to_connection_failures() {
        let err = map_pool_error(PoolError::build("bad url"));
        assert!(matches!(err, PostStoreError::Connection { .. }));
    }
}
