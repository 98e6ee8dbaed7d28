//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::{AuthService, PostService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signup/login use-cases.
    pub auth: Arc<AuthService>,
    /// Post creation and retrieval use-cases.
    pub posts: Arc<PostService>,
}

impl HttpState {
    /// Construct state from the two domain services.
    #[must_use]
    pub fn new(auth: AuthService, posts: PostService) -> Self {
        Self {
            auth: Arc::new(auth),
            posts: Arc::new(posts),
        }
    }
}
