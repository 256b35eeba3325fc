//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, plus the services implementing the driving ports. Types document
//! their invariants and serialisation contracts (serde) in their Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Blog, BlogId, PopulatedBlog: blog entries and the owner-expanded view.
//! - User, UserId, Username: accounts owning blogs.
//! - BlogFieldPolicy, UpdateAccess: configurable blog rules.
//! - analytics: pure aggregate reductions.
//! - BlogService, UserService: driving port implementations.

pub mod analytics;
pub mod auth;
pub mod blog;
pub mod blog_policy;
pub mod blog_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::auth::{
    Credential, EmptyCredential, LoginCredentials, LoginValidationError, PASSWORD_MIN,
    Registration, RegistrationError,
};
pub use self::blog::{Blog, BlogDraft, BlogFields, BlogId, BlogIdError, PopulatedBlog};
pub use self::blog_policy::{
    BlogField, BlogFieldPolicy, BlogPolicy, BlogValidationError, LIKES_MAX, UnknownPolicyName,
    UpdateAccess,
};
pub use self::blog_service::BlogService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    CredentialSecret, NAME_MAX, OwnerSummary, PersonName, USERNAME_MAX, USERNAME_MIN, User,
    UserId, UserValidationError, Username,
};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use bloglist::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
