//! Port for one-way password hashing.

use crate::domain::CredentialSecret;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum CredentialHashError {
        /// Hashing failed or a stored hash could not be parsed.
        Hashing { message: String } => "credential hashing failed: {message}",
    }
}

/// Hashes new passwords and verifies candidates against stored hashes.
///
/// Implementations are synchronous and CPU bound.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Produce an encoded hash for `password`.
    fn hash(&self, password: &str) -> Result<CredentialSecret, CredentialHashError>;

    /// Whether `password` matches `secret`. A mismatch is `Ok(false)`, not
    /// an error.
    fn verify(&self, password: &str, secret: &CredentialSecret)
    -> Result<bool, CredentialHashError>;
}
