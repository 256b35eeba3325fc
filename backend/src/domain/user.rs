//! User accounts that own blogs.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::BlogId;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username must be at least {min} characters")]
    UsernameTooShort { min: usize },
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Stable user identifier.
///
/// Identities are compared through their canonical hyphenated form, so two
/// ids parsed from differently-cased input still refer to the same user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Whether `other` denotes the same user, compared by normalized string
    /// form rather than by representation.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Minimum username length, counted in characters.
pub const USERNAME_MIN: usize = 3;

/// Maximum username length, counted in characters. Matches the width of the
/// `users.username` column.
pub const USERNAME_MAX: usize = 64;

/// Maximum display name length, counted in characters.
pub const NAME_MAX: usize = 255;

/// Unique login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Trim and validate a username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name shown next to a user's posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Validate a non-blank name of at most [`NAME_MAX`] characters. Inner
    /// whitespace is preserved.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if raw.chars().count() > NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Stored password hash. Never serialized and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialSecret(Zeroizing<String>);

impl CredentialSecret {
    /// Wrap an encoded hash produced by a credential hasher.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(Zeroizing::new(encoded.into()))
    }

    /// Encoded hash for verification and persistence adapters.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for CredentialSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialSecret(<redacted>)")
    }
}

/// Registered account.
///
/// ## Invariants
/// - `username` is trimmed and between [`USERNAME_MIN`] and [`USERNAME_MAX`]
///   characters.
/// - `blogs` keeps insertion order and may hold stale ids until the owner
///   list is reconciled.
///
/// The serialized form exposes `id`, `username`, `name` and `blogs`; the
/// credential secret is always stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "UserDto")]
pub struct User {
    id: UserId,
    username: Username,
    name: PersonName,
    credential_secret: CredentialSecret,
    blogs: Vec<BlogId>,
}

impl User {
    /// Build a user from validated parts.
    pub fn new(
        id: UserId,
        username: Username,
        name: PersonName,
        credential_secret: CredentialSecret,
    ) -> Self {
        Self {
            id,
            username,
            name,
            credential_secret,
            blogs: Vec::new(),
        }
    }

    /// Replace the owned-blog references, typically when restoring from
    /// storage.
    #[must_use]
    pub fn with_blogs(mut self, blogs: Vec<BlogId>) -> Self {
        self.blogs = blogs;
        self
    }

    /// Append a newly created blog to the owned list.
    pub fn push_blog(&mut self, blog: BlogId) {
        self.blogs.push(blog);
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn credential_secret(&self) -> &CredentialSecret {
        &self.credential_secret
    }

    pub fn blogs(&self) -> &[BlogId] {
        &self.blogs
    }

    /// The reduced projection used when a blog expands its owner.
    pub fn summary(&self) -> OwnerSummary {
        OwnerSummary {
            id: self.id,
            username: self.username.to_string(),
            name: self.name.as_ref().to_owned(),
        }
    }
}

/// Reduced owner projection: identity, username and name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    pub id: UserId,
    pub username: String,
    pub name: String,
}

#[derive(Serialize)]
struct UserDto {
    id: String,
    username: String,
    name: String,
    blogs: Vec<String>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        Self {
            id: value.id.to_string(),
            username: value.username.0,
            name: value.name.0,
            blogs: value.blogs.iter().map(ToString::to_string).collect(),
        }
    }
}
