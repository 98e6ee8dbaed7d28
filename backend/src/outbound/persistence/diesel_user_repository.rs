//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! A thin adapter: translates between Diesel row structs and domain types
//! and maps database failures onto [`UserStoreError`] variants. The
//! username/email uniqueness constraints live in the database; a unique
//! violation surfaces as `DuplicateIdentity`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserRepository, UserStoreError};
use crate::domain::{EmailAddress, MediaPath, PasswordHashString, User, UserId, Username};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserStoreError {
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
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            UserStoreError::duplicate_identity(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info)
        | DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, info) => {
            UserStoreError::validation(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserStoreError::connection("database connection error")
        }
        DieselError::NotFound => UserStoreError::query("record not found"),
        _ => UserStoreError::query("database error"),
    }
}

/// Convert a database row to a domain [`User`].
///
/// Row data already passed validation at write time; a failure here means
/// the stored record no longer satisfies the domain invariants.
fn row_to_user(row: UserRow) -> Result<User, UserStoreError> {
    let username = Username::new(row.username)
        .map_err(|err| UserStoreError::validation(format!("stored username invalid: {err}")))?;
    let email = EmailAddress::new(row.email)
        .map_err(|err| UserStoreError::validation(format!("stored email invalid: {err}")))?;
    let password_hash = PasswordHashString::new(row.password_hash)
        .map_err(|err| UserStoreError::validation(format!("stored hash invalid: {err}")))?;
    let image_url = row
        .image_url
        .map(MediaPath::new)
        .transpose()
        .map_err(|err| UserStoreError::validation(format!("stored image path invalid: {err}")))?;

    Ok(User::new(
        UserId::from_uuid(row.id),
        username,
        email,
        password_hash,
        image_url,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            email: user.email().as_ref(),
            password_hash: user.password_hash().as_str(),
            image_url: user.image_url().map(AsRef::as_ref),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(username: &str, email: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash: "$2b$10$hash".to_owned(),
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_conversion_produces_a_domain_user() {
        let user = row_to_user(row("ada", "ada@example.com")).expect("valid row");
        assert_eq!(user.username().as_ref(), "ada");
        assert_eq!(user.email().as_ref(), "ada@example.com");
    }

    #[rstest]
    #[case("bad name!", "ada@example.com")]
    #[case("ada", "not-an-email")]
    fn corrupt_rows_surface_as_validation_errors(#[case] username: &str, #[case] email: &str) {
        let err = row_to_user(row(username, email)).expect_err("corrupt row");
        assert!(matches!(err, UserStoreError::Validation { .. }));
    }

    #[test]
    fn pool_errors_map_to_connection_failures() {
        let err = map_pool_error(PoolError::checkout("no connections"));
        assert!(matches!(err, UserStoreError::Connection { .. }));
    }

    #[test]
    fn not_found_maps_to_a_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, UserStoreError::Query { .. }));
    }
}
