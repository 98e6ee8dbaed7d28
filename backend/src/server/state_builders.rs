//! Builders wiring domain services to their port implementations.
//!
//! With a database pool configured, the Diesel-backed repositories are used;
//! without one, the in-memory fixtures serve a self-contained instance
//! (useful for local development and tests). The bcrypt hasher and the
//! filesystem media store are always real.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use crate::domain::ports::{
    CredentialHasher, InMemoryPostRepository, InMemoryUserRepository, MediaStore, PostRepository,
    UserRepository,
};
use crate::domain::{AuthService, PostService};
use crate::inbound::http::state::HttpState;
use crate::outbound::media::FsMediaStore;
use crate::outbound::persistence::{DieselPostRepository, DieselUserRepository};
use crate::outbound::security::BcryptCredentialHasher;

use super::ServerConfig;

pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (users, posts): (Arc<dyn UserRepository>, Arc<dyn PostRepository>) =
        match &config.db_pool {
            Some(pool) => (
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselPostRepository::new(pool.clone())),
            ),
            None => {
                warn!("no database configured; using in-memory stores (state is lost on restart)");
                (
                    Arc::new(InMemoryUserRepository::default()),
                    Arc::new(InMemoryPostRepository::default()),
                )
            }
        };

    let hasher: Arc<dyn CredentialHasher> = Arc::new(BcryptCredentialHasher);
    let media: Arc<dyn MediaStore> = Arc::new(FsMediaStore::new(config.media_root.clone()));

    let auth = AuthService::new(users.clone(), hasher, media.clone());
    let post_service = PostService::new(posts, users, media);
    web::Data::new(HttpState::new(auth, post_service))
}
