//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Create an account, failing with `conflict` when the username is taken.
    async fn register(&self, registration: Registration) -> Result<User, Error>;
}
