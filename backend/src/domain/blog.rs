//! Blog entries and their owner-expanded projection.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OwnerSummary, UserId};

/// Errors raised while parsing blog identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlogIdError {
    #[error("blog id must not be empty")]
    Empty,
    #[error("blog id must be a valid UUID")]
    Malformed,
}

/// Stable blog identifier, generated by the domain before insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlogId(Uuid);

impl BlogId {
    /// Parse an identifier supplied by a caller.
    ///
    /// # Examples
    /// ```
    /// use bloglist::domain::BlogId;
    ///
    /// assert!(BlogId::new("5a422a851b54a676234d17f7").is_err());
    /// assert!(BlogId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, BlogIdError> {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            return Err(BlogIdError::Empty);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| BlogIdError::Malformed)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<BlogId> for String {
    fn from(value: BlogId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for BlogId {
    type Error = BlogIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated, caller-controlled content of a blog.
///
/// Produced by [`crate::domain::BlogFieldPolicy::validate`]; `title` is never
/// blank and `likes` has already been defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogFields {
    pub title: String,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: u64,
}

/// Unvalidated blog content as submitted by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BlogDraft {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

/// A stored blog entry.
///
/// ## Invariants
/// - `id` never changes after creation.
/// - `owner` is assigned at creation and never reassigned by updates.
/// - `comments` keeps insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "BlogDto")]
pub struct Blog {
    id: BlogId,
    fields: BlogFields,
    comments: Vec<String>,
    owner: Option<UserId>,
}

impl Blog {
    pub fn new(id: BlogId, fields: BlogFields, owner: Option<UserId>) -> Self {
        Self {
            id,
            fields,
            comments: Vec::new(),
            owner,
        }
    }

    /// Replace the caller-controlled fields, keeping identity and owner.
    #[must_use]
    pub fn with_fields(mut self, fields: BlogFields) -> Self {
        self.fields = fields;
        self
    }

    /// Replace the comment list wholesale.
    #[must_use]
    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }

    pub fn id(&self) -> &BlogId {
        &self.id
    }

    pub fn fields(&self) -> &BlogFields {
        &self.fields
    }

    pub fn title(&self) -> &str {
        self.fields.title.as_str()
    }

    pub fn author(&self) -> Option<&str> {
        self.fields.author.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.fields.url.as_deref()
    }

    pub fn likes(&self) -> u64 {
        self.fields.likes
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    /// Whether `user` owns this blog. Blogs without an owner belong to nobody.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner
            .as_ref()
            .is_some_and(|owner| owner.same_identity(user))
    }
}

#[derive(Serialize)]
struct BlogDto {
    id: String,
    title: String,
    author: Option<String>,
    url: Option<String>,
    likes: u64,
    comments: Vec<String>,
    user: Option<String>,
}

impl From<Blog> for BlogDto {
    fn from(value: Blog) -> Self {
        let Blog {
            id,
            fields,
            comments,
            owner,
        } = value;
        Self {
            id: id.to_string(),
            title: fields.title,
            author: fields.author,
            url: fields.url,
            likes: fields.likes,
            comments,
            user: owner.map(|owner| owner.to_string()),
        }
    }
}

/// A blog whose owner reference has been expanded to a summary.
///
/// `owner` is `None` when the blog has no owner or the owner no longer
/// exists; the reference then serializes as `null`, the same as an absent
/// `author` or `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "PopulatedBlogDto")]
pub struct PopulatedBlog {
    pub blog: Blog,
    pub owner: Option<OwnerSummary>,
}

#[derive(Serialize)]
struct PopulatedBlogDto {
    id: String,
    title: String,
    author: Option<String>,
    url: Option<String>,
    likes: u64,
    comments: Vec<String>,
    user: Option<OwnerSummary>,
}

impl From<PopulatedBlog> for PopulatedBlogDto {
    fn from(value: PopulatedBlog) -> Self {
        let PopulatedBlog { blog, owner } = value;
        let Blog {
            id,
            fields,
            comments,
            ..
        } = blog;
        Self {
            id: id.to_string(),
            title: fields.title,
            author: fields.author,
            url: fields.url,
            likes: fields.likes,
            comments,
            user: owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn fields() -> BlogFields {
        BlogFields {
            title: "React patterns".into(),
            author: Some("Michael Chan".into()),
            url: Some("https://reactpatterns.com/".into()),
            likes: 7,
        }
    }

    #[rstest]
    #[case("", BlogIdError::Empty)]
    #[case("   ", BlogIdError::Empty)]
    #[case("5a422a851b54a676234d17f7", BlogIdError::Malformed)]
    fn blog_id_rejects_malformed_input(#[case] raw: &str, #[case] expected: BlogIdError) {
        assert_eq!(BlogId::new(raw), Err(expected));
    }

    #[rstest]
    fn ownership_requires_matching_identity(fields: BlogFields) {
        let owner = UserId::random();
        let blog = Blog::new(BlogId::random(), fields, Some(owner));

        assert!(blog.is_owned_by(&owner));
        assert!(!blog.is_owned_by(&UserId::random()));
    }

    #[rstest]
    fn unowned_blogs_belong_to_nobody(fields: BlogFields) {
        let blog = Blog::new(BlogId::random(), fields, None);
        assert!(!blog.is_owned_by(&UserId::random()));
    }

    #[rstest]
    fn with_fields_preserves_identity_owner_and_comments(fields: BlogFields) {
        let owner = UserId::random();
        let blog = Blog::new(BlogId::random(), fields, Some(owner))
            .with_comments(vec!["first".into()]);
        let id = *blog.id();

        let updated = blog.with_fields(BlogFields {
            title: "Go To Statement Considered Harmful".into(),
            author: None,
            url: None,
            likes: 5,
        });

        assert_eq!(updated.id(), &id);
        assert_eq!(updated.owner(), Some(&owner));
        assert_eq!(updated.comments(), ["first".to_owned()]);
        assert_eq!(updated.likes(), 5);
    }

    #[rstest]
    fn serialises_owner_as_reference(fields: BlogFields) {
        let owner = UserId::random();
        let blog = Blog::new(BlogId::random(), fields, Some(owner));

        let value = serde_json::to_value(&blog).expect("blog serialises");
        assert_eq!(value["user"], owner.to_string());
        assert_eq!(value["likes"], 7);
        assert_eq!(value["comments"], serde_json::json!([]));
    }

    #[rstest]
    fn populated_blog_expands_owner(fields: BlogFields) {
        let owner = OwnerSummary {
            id: UserId::random(),
            username: "mluukkai".into(),
            name: "Matti Luukkainen".into(),
        };
        let populated = PopulatedBlog {
            blog: Blog::new(BlogId::random(), fields, Some(owner.id)),
            owner: Some(owner.clone()),
        };

        let value = serde_json::to_value(&populated).expect("blog serialises");
        assert_eq!(value["user"]["username"], "mluukkai");
        assert_eq!(value["user"]["id"], owner.id.to_string());
        assert!(value["user"].get("blogs").is_none());
    }

    #[rstest]
    fn absent_optional_fields_serialise_as_null() {
        let fields = BlogFields {
            title: "Untitled draft".into(),
            author: None,
            url: None,
            likes: 0,
        };
        let blog = Blog::new(BlogId::random(), fields, None);
        let populated = PopulatedBlog {
            blog: blog.clone(),
            owner: None,
        };

        for value in [
            serde_json::to_value(&blog).expect("blog serialises"),
            serde_json::to_value(&populated).expect("populated blog serialises"),
        ] {
            for key in ["author", "url", "user"] {
                assert_eq!(value.get(key), Some(&serde_json::Value::Null), "{key}");
            }
        }
    }

    #[rstest]
    fn missing_owner_serialises_as_null(fields: BlogFields) {
        let populated = PopulatedBlog {
            blog: Blog::new(BlogId::random(), fields, None),
            owner: None,
        };
        let value = serde_json::to_value(&populated).expect("blog serialises");
        assert!(value["user"].is_null());
    }
}
