//! Argon2id adapter for the credential hashing port.

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use uuid::Uuid;

use crate::domain::CredentialSecret;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Hashes passwords into PHC strings with Argon2id.
#[derive(Debug, Clone)]
pub struct Argon2CredentialHasher {
    params: Params,
}

impl Argon2CredentialHasher {
    /// Hasher with the library's recommended cost parameters.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Hasher with explicit cost parameters, e.g. cheap ones for tests.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn map_hash_error(error: password_hash::Error) -> CredentialHashError {
    CredentialHashError::hashing(error.to_string())
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<CredentialSecret, CredentialHashError> {
        let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes()).map_err(map_hash_error)?;
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(map_hash_error)?;
        Ok(CredentialSecret::new(hash.to_string()))
    }

    fn verify(
        &self,
        password: &str,
        secret: &CredentialSecret,
    ) -> Result<bool, CredentialHashError> {
        let parsed = PasswordHash::new(secret.expose()).map_err(map_hash_error)?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(map_hash_error(err)),
        }
    }
}
