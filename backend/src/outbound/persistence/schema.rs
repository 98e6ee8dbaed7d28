//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate with
//! `diesel print-schema` or update by hand.

diesel::table! {
    /// User accounts.
    ///
    /// `username` and `email` carry unique constraints; `email` is stored
    /// lowercased by the application.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique handle (max 32 characters).
        username -> Varchar,
        /// Unique, normalised email address.
        email -> Varchar,
        /// bcrypt PHC-format password hash.
        password_hash -> Text,
        /// Optional profile image path.
        image_url -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Posts, each linked to a creating user.
    posts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Post body text.
        content -> Text,
        /// Foreign key to `users.id`.
        creator_id -> Uuid,
        /// Optional stored picture path.
        pic_path -> Nullable<Text>,
        /// Optional caller-supplied picture name.
        pic_name -> Nullable<Varchar>,
        /// Record creation timestamp; fixes the listing order.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(posts -> users (creator_id));
diesel::allow_tables_to_appear_in_same_query!(posts, users);
