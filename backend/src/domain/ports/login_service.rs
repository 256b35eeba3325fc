//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to exchange a username and password for a bearer
//! credential without knowing which hasher or token format backs it.

use async_trait::async_trait;

use crate::domain::{Credential, Error, LoginCredentials, User};

/// Successful login: the issued credential and the account it identifies.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub token: Credential,
    pub user: User,
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a bearer credential.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, Error>;
}
