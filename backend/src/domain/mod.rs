//! Domain primitives, ports, and use-case services.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.

pub mod auth;
mod auth_service;
mod deadline;
pub mod error;
pub mod media;
pub mod ports;
pub mod post;
mod post_service;
mod store_errors;
mod trace_id;
pub mod user;

pub use self::auth::{
    LoginCredentials, LoginValidationError, SignupForm, SignupValidationError,
    password_meets_policy,
};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode};
pub use self::media::{ImageUpload, MediaPath, MediaValidationError};
pub use self::post::{Post, PostContent, PostDraft, PostId, PostRecord, PostValidationError};
pub use self::post_service::PostService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, PasswordHashString, User, UserId, UserProfile, UserValidationError, Username,
};
