//! Builders wiring repositories into the services behind [`HttpState`].

use std::sync::Arc;

use bloglist::domain::ports::{BlogRepository, IdentityVerifier, TokenIssuer, UserRepository};
use bloglist::domain::{BlogPolicy, BlogService, UserService};
use bloglist::inbound::http::state::HttpState;
use bloglist::outbound::hashing::Argon2CredentialHasher;
use bloglist::outbound::memory::InMemoryStore;
use bloglist::outbound::persistence::{DieselBlogRepository, DieselUserRepository};
use tracing::info;

use super::ServerConfig;

fn build_services<B, U, T>(blogs: Arc<B>, users: Arc<U>, tokens: Arc<T>, policy: BlogPolicy) -> HttpState
where
    B: BlogRepository + 'static,
    U: UserRepository + 'static,
    T: IdentityVerifier + TokenIssuer + 'static,
{
    let blog_service = BlogService::new(blogs, users.clone(), tokens.clone(), policy);
    let user_service = UserService::new(users, Arc::new(Argon2CredentialHasher::new()), tokens);
    HttpState::from_services(Arc::new(blog_service), Arc::new(user_service))
}

/// Build handler state over PostgreSQL when a pool is configured, otherwise
/// over a fresh in-memory store.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let tokens = config.tokens.clone();
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            build_services(
                Arc::new(DieselBlogRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool.clone())),
                tokens,
                config.policy,
            )
        }
        None => {
            info!("no database configured; using the in-memory store");
            let store = Arc::new(InMemoryStore::new());
            build_services(store.clone(), store, tokens, config.policy)
        }
    }
}
