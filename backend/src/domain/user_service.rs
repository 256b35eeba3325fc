//! Account services: registration, listing and login.
//!
//! Password hashing is CPU bound, so hasher calls run on Tokio's blocking
//! pool rather than on the request task.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    CredentialHashError, CredentialHasher, IdentityError, LoginGrant, LoginService, TokenIssuer,
    UserCommand, UserPersistenceError, UserRepository, UsersQuery,
};
use crate::domain::{
    CredentialSecret, Error, LoginCredentials, Registration, User, UserId,
};

const INVALID_LOGIN: &str = "invalid username or password";

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict(format!("username `{username}` is already taken")).with_details(
                json!({
                    "field": "username",
                    "code": "duplicate",
                }),
            )
        }
    }
}

fn map_hash_error(error: CredentialHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_issuer_error(error: IdentityError) -> Error {
    Error::internal(format!("failed to issue credential: {error}"))
}

/// Service implementing the account driving ports.
#[derive(Clone)]
pub struct UserService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    issuer: Arc<T>,
}

impl<U, H, T> UserService<U, H, T> {
    pub fn new(users: Arc<U>, hasher: Arc<H>, issuer: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            issuer,
        }
    }
}

impl<U, H, T> UserService<U, H, T>
where
    H: CredentialHasher + 'static,
{
    async fn hash_password(&self, password: &str) -> Result<CredentialSecret, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|err| Error::internal(format!("hashing task failed: {err}")))?
            .map_err(map_hash_error)
    }

    async fn verify_password(&self, password: &str, secret: CredentialSecret) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(password.as_str(), &secret))
            .await
            .map_err(|err| Error::internal(format!("verification task failed: {err}")))?
            .map_err(map_hash_error)
    }
}

#[async_trait]
impl<U, H, T> UserCommand for UserService<U, H, T>
where
    U: UserRepository,
    H: CredentialHasher + 'static,
    T: TokenIssuer,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let secret = self.hash_password(registration.password()).await?;
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.name().clone(),
            secret,
        );

        self.users
            .insert(&user)
            .await
            .map_err(map_user_persistence_error)?;

        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<U, H, T> UsersQuery for UserService<U, H, T>
where
    U: UserRepository,
    H: CredentialHasher + 'static,
    T: TokenIssuer,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_user_persistence_error)
    }
}

#[async_trait]
impl<U, H, T> LoginService for UserService<U, H, T>
where
    U: UserRepository,
    H: CredentialHasher + 'static,
    T: TokenIssuer,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, Error> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_persistence_error)?
        else {
            warn!(username = credentials.username(), "login for unknown user");
            return Err(Error::unauthorized(INVALID_LOGIN));
        };

        let matches = self
            .verify_password(credentials.password(), user.credential_secret().clone())
            .await?;
        if !matches {
            warn!(user_id = %user.id(), "login with wrong password");
            return Err(Error::unauthorized(INVALID_LOGIN));
        }

        let token = self.issuer.issue(&user).await.map_err(map_issuer_error)?;
        info!(user_id = %user.id(), "user logged in");
        Ok(LoginGrant { token, user })
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
