//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Thin adapters only: repository implementations translate between Diesel
//! models and domain types, no business logic. Row structs (`models`) and
//! the schema definitions are internal implementation details, never exposed
//! to the domain. Connections come from a `bb8` pool with native async
//! support through `diesel-async`, and every database error is mapped onto a
//! domain port error.

mod diesel_post_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
