//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BlogCommand, BlogQuery, LoginService, UserCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub blogs_query: Arc<dyn BlogQuery>,
    pub blogs: Arc<dyn BlogCommand>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Wire the state from one blog service and one account service, each
    /// implementing all of its driving ports.
    pub fn from_services<B, U>(blogs: Arc<B>, users: Arc<U>) -> Self
    where
        B: BlogQuery + BlogCommand + 'static,
        U: UserCommand + UsersQuery + LoginService + 'static,
    {
        Self {
            blogs_query: blogs.clone(),
            blogs,
            users: users.clone(),
            users_query: users.clone(),
            login: users,
        }
    }
}
