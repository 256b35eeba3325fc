//! Required-field policy and update access rules for blogs.
//!
//! Deployments disagree on which blog fields are mandatory, so the rule set
//! is a value chosen at startup rather than hard-coded in the service.

use std::fmt;
use std::str::FromStr;

use super::{BlogDraft, BlogFields};

/// Caller-controlled blog field that a policy may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogField {
    Title,
    Author,
    Url,
    Likes,
}

impl BlogField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Url => "url",
            Self::Likes => "likes",
        }
    }
}

impl fmt::Display for BlogField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure for blog content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BlogValidationError {
    #[error("missing required field: {0}")]
    MissingField(BlogField),
    #[error("{0} must be at most {max}", max = LIKES_MAX)]
    OutOfRange(BlogField),
}

/// Largest like count a blog can hold; storage keeps likes as a signed
/// 64-bit integer.
pub const LIKES_MAX: u64 = i64::MAX.unsigned_abs();

/// Which optional blog fields must be present. `title` is always required.
///
/// # Examples
/// ```
/// use bloglist::domain::{BlogDraft, BlogFieldPolicy};
///
/// let draft = BlogDraft {
///     title: Some("Type wars".into()),
///     ..BlogDraft::default()
/// };
/// let fields = BlogFieldPolicy::MINIMAL.validate(draft).expect("title is enough");
/// assert_eq!(fields.likes, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlogFieldPolicy {
    pub author_required: bool,
    pub url_required: bool,
}

impl BlogFieldPolicy {
    /// Only `title` is required.
    pub const MINIMAL: Self = Self {
        author_required: false,
        url_required: false,
    };
    /// `title` and `author` are required.
    pub const AUTHORED: Self = Self {
        author_required: true,
        url_required: false,
    };
    /// `title`, `author` and `url` are required.
    pub const LINKED: Self = Self {
        author_required: true,
        url_required: true,
    };

    /// Check `draft` against the policy and default `likes` to zero.
    ///
    /// Fields are checked in the order title, author, url and the first
    /// missing one is reported. Blank strings count as missing. `likes`
    /// above [`LIKES_MAX`] is rejected.
    pub fn validate(&self, draft: BlogDraft) -> Result<BlogFields, BlogValidationError> {
        let BlogDraft {
            title,
            author,
            url,
            likes,
        } = draft;

        let title = present(title).ok_or(BlogValidationError::MissingField(BlogField::Title))?;
        let author = present(author);
        if self.author_required && author.is_none() {
            return Err(BlogValidationError::MissingField(BlogField::Author));
        }
        let url = present(url);
        if self.url_required && url.is_none() {
            return Err(BlogValidationError::MissingField(BlogField::Url));
        }

        let likes = likes.unwrap_or(0);
        if likes > LIKES_MAX {
            return Err(BlogValidationError::OutOfRange(BlogField::Likes));
        }

        Ok(BlogFields {
            title,
            author,
            url,
            likes,
        })
    }
}

impl Default for BlogFieldPolicy {
    fn default() -> Self {
        Self::AUTHORED
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

/// Error returned when a preset or access name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownPolicyName {
    kind: &'static str,
    value: String,
}

impl FromStr for BlogFieldPolicy {
    type Err = UnknownPolicyName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(Self::MINIMAL),
            "authored" => Ok(Self::AUTHORED),
            "linked" => Ok(Self::LINKED),
            _ => Err(UnknownPolicyName {
                kind: "blog field preset",
                value: s.to_owned(),
            }),
        }
    }
}

/// Who may update a blog's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateAccess {
    /// Any caller, authenticated or not.
    #[default]
    Unrestricted,
    /// Only the authenticated owner.
    OwnerOnly,
}

impl FromStr for UpdateAccess {
    type Err = UnknownPolicyName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "unrestricted" => Ok(Self::Unrestricted),
            "owner_only" => Ok(Self::OwnerOnly),
            _ => Err(UnknownPolicyName {
                kind: "update access",
                value: s.to_owned(),
            }),
        }
    }
}

/// Combined blog rules handed to the blog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlogPolicy {
    pub fields: BlogFieldPolicy,
    pub update_access: UpdateAccess,
}
