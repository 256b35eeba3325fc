//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their domain types but
//! live in the inbound adapter layer where framework concerns belong.

#![expect(
    dead_code,
    reason = "Schema wrappers are only read by utoipa derive output"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// The backing store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "missing required field: title")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "6f9619ff-8b86-d011-b42d-00cf4fc964ff")]
    trace_id: Option<String>,
    /// Supplementary error details, e.g. `{"field": "title", "code": "missing_field"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
pub struct UserSchema {
    #[schema(format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "mluukkai")]
    username: String,
    #[schema(example = "Matti Luukkainen")]
    name: String,
    /// Identifiers of the blogs this user created.
    #[schema(value_type = Vec<uuid::Uuid>)]
    blogs: Vec<String>,
}

/// OpenAPI schema for [`crate::domain::OwnerSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::OwnerSummary)]
pub struct OwnerSummarySchema {
    #[schema(format = Uuid)]
    id: String,
    username: String,
    name: String,
}

/// OpenAPI schema for [`crate::domain::Blog`] as returned by writes.
///
/// `user` holds the owner's identifier, or `null` for unowned entries.
#[derive(ToSchema)]
#[schema(as = crate::domain::Blog)]
pub struct BlogSchema {
    #[schema(format = Uuid)]
    id: String,
    #[schema(example = "React patterns")]
    title: String,
    #[schema(example = "Michael Chan")]
    author: Option<String>,
    #[schema(example = "https://reactpatterns.com/")]
    url: Option<String>,
    #[schema(minimum = 0, example = 7)]
    likes: u64,
    comments: Vec<String>,
    #[schema(format = Uuid)]
    user: Option<String>,
}

/// OpenAPI schema for [`crate::domain::PopulatedBlog`] as returned by reads.
#[derive(ToSchema)]
#[schema(as = crate::domain::PopulatedBlog)]
pub struct PopulatedBlogSchema {
    #[schema(format = Uuid)]
    id: String,
    title: String,
    author: Option<String>,
    url: Option<String>,
    #[schema(minimum = 0)]
    likes: u64,
    comments: Vec<String>,
    user: Option<OwnerSummarySchema>,
}

/// OpenAPI schema for [`crate::domain::analytics::FavoriteBlog`].
#[derive(ToSchema)]
#[schema(as = crate::domain::analytics::FavoriteBlog)]
pub struct FavoriteBlogSchema {
    #[schema(example = "Canonical string reduction")]
    title: String,
    #[schema(example = "Edsger W. Dijkstra")]
    author: Option<String>,
    #[schema(example = 12)]
    likes: u64,
}

/// OpenAPI schema for [`crate::domain::analytics::AuthorBlogCount`].
#[derive(ToSchema)]
#[schema(as = crate::domain::analytics::AuthorBlogCount)]
pub struct AuthorBlogCountSchema {
    #[schema(example = "Robert C. Martin")]
    author: Option<String>,
    #[schema(example = 3)]
    blogs: u64,
}

/// OpenAPI schema for [`crate::domain::analytics::AuthorLikes`].
#[derive(ToSchema)]
#[schema(as = crate::domain::analytics::AuthorLikes)]
pub struct AuthorLikesSchema {
    #[schema(example = "Edsger W. Dijkstra")]
    author: Option<String>,
    #[schema(example = 17)]
    likes: u64,
}

/// OpenAPI schema for [`crate::domain::analytics::BlogStats`].
///
/// The three leaders are `null` when there are no blogs.
#[derive(ToSchema)]
#[schema(as = crate::domain::analytics::BlogStats)]
#[schema(rename_all = "camelCase")]
pub struct BlogStatsSchema {
    #[schema(example = 36)]
    total_likes: u64,
    favorite_blog: Option<FavoriteBlogSchema>,
    most_blogs: Option<AuthorBlogCountSchema>,
    most_likes: Option<AuthorLikesSchema>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_schema_uses_camel_case_trace_id() {
        let schema_json = schema_to_json::<ErrorSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"));
        assert!(!schema_json.contains("trace_id"));
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn user_schema_never_mentions_the_password_hash() {
        let schema_json = schema_to_json::<UserSchema>();
        assert!(schema_json.contains("blogs"));
        assert!(!schema_json.contains("password"));
    }

    #[test]
    fn stats_schema_is_camel_case() {
        let schema_json = schema_to_json::<BlogStatsSchema>();
        for field in ["totalLikes", "favoriteBlog", "mostBlogs", "mostLikes"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }
}
