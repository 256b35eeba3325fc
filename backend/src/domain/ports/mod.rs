//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod blog_command;
mod blog_query;
mod blog_repository;
mod credential_hasher;
mod identity;
mod login_service;
mod user_command;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use blog_command::MockBlogCommand;
pub use blog_command::{
    BlogCommand, CreateBlogRequest, DeleteBlogRequest, DeleteBlogResponse,
    ReplaceCommentsRequest, UpdateBlogRequest,
};
#[cfg(test)]
pub use blog_query::MockBlogQuery;
pub use blog_query::BlogQuery;
#[cfg(test)]
pub use blog_repository::MockBlogRepository;
pub use blog_repository::{BlogRepository, BlogRepositoryError};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use identity::{MockIdentityVerifier, MockTokenIssuer};
pub use identity::{IdentityError, IdentityVerifier, TokenIssuer};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginGrant, LoginService};
#[cfg(test)]
pub use user_command::MockUserCommand;
pub use user_command::UserCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
