//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::web;

use crate::domain::ports::{InMemoryMediaStore, InMemoryPostRepository, InMemoryUserRepository};
use crate::domain::{AuthService, PostService};
use crate::inbound::http::state::HttpState;
use crate::outbound::security::BcryptCredentialHasher;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// In-memory adapters plus the HTTP state built over them, so tests can
/// observe store contents directly.
pub struct TestHarness {
    pub users: Arc<InMemoryUserRepository>,
    pub posts: Arc<InMemoryPostRepository>,
    pub media: Arc<InMemoryMediaStore>,
    pub state: web::Data<HttpState>,
}

/// Build handler state over fresh in-memory adapters and the real bcrypt
/// hasher.
pub fn test_harness() -> TestHarness {
    let users = Arc::new(InMemoryUserRepository::default());
    let posts = Arc::new(InMemoryPostRepository::default());
    let media = Arc::new(InMemoryMediaStore::default());
    let auth = AuthService::new(users.clone(), Arc::new(BcryptCredentialHasher), media.clone());
    let post_service = PostService::new(posts.clone(), users.clone(), media.clone());
    TestHarness {
        users,
        posts,
        media,
        state: web::Data::new(HttpState::new(auth, post_service)),
    }
}
