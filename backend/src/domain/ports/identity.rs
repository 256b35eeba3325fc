//! Ports for resolving and issuing bearer credentials.
//!
//! The signing secret belongs to the adapter that implements these traits; it
//! is injected when the adapter is built and never read by the domain.

use async_trait::async_trait;

use crate::domain::{Credential, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity adapters.
    pub enum IdentityError {
        /// The credential is malformed, expired or signed with another key.
        InvalidCredential { message: String } => "credential rejected: {message}",
        /// A credential could not be produced for the user.
        Issuance { message: String } => "credential issuance failed: {message}",
    }
}

/// Resolves a presented credential to the identity it was issued for.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn resolve(&self, credential: &Credential) -> Result<UserId, IdentityError>;
}

/// Issues credentials for authenticated users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue(&self, user: &User) -> Result<Credential, IdentityError>;
}
