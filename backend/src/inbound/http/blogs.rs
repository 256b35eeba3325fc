//! Blog collection HTTP handlers.
//!
//! ```text
//! GET    /api/v1/blogs
//! GET    /api/v1/blogs/stats
//! GET    /api/v1/blogs/{id}
//! POST   /api/v1/blogs                 Authorization: Bearer <token>
//! PUT    /api/v1/blogs/{id}
//! PUT    /api/v1/blogs/{id}/comments
//! DELETE /api/v1/blogs/{id}            Authorization: Bearer <token>
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::analytics::BlogStats;
use crate::domain::ports::{
    CreateBlogRequest, DeleteBlogRequest, ReplaceCommentsRequest, UpdateBlogRequest,
};
use crate::domain::{Blog, BlogDraft, PopulatedBlog};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::BearerCredential;
use crate::inbound::http::schemas::{
    BlogSchema, BlogStatsSchema, ErrorSchema, PopulatedBlogSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_blog_id};

const ID_FIELD: FieldName = FieldName::new("id");

/// Blog fields submitted on create and update.
///
/// Which of `author` and `url` are required depends on the configured field
/// policy; `likes` defaults to 0 when omitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct BlogRequestBody {
    #[schema(example = "Go To Statement Considered Harmful")]
    pub title: Option<String>,
    #[schema(example = "Edsger W. Dijkstra")]
    pub author: Option<String>,
    #[schema(example = "https://homepages.cwi.nl/~storm/teaching/reader/Dijkstra68.pdf")]
    pub url: Option<String>,
    #[schema(minimum = 0, example = 5)]
    pub likes: Option<u64>,
}

impl From<BlogRequestBody> for BlogDraft {
    fn from(value: BlogRequestBody) -> Self {
        Self {
            title: value.title,
            author: value.author,
            url: value.url,
            likes: value.likes,
        }
    }
}

/// Replacement comment list for `PUT /api/v1/blogs/{id}/comments`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CommentsRequestBody {
    #[schema(example = json!(["first!", "great read"]))]
    pub comments: Vec<String>,
}

/// List every blog with its owner expanded.
#[utoipa::path(
    get,
    path = "/api/v1/blogs",
    responses(
        (status = 200, description = "Blogs", body = [PopulatedBlogSchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "listBlogs",
    security([])
)]
#[get("/blogs")]
pub async fn list_blogs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PopulatedBlog>>> {
    let blogs = state.blogs_query.list_blogs().await?;
    Ok(web::Json(blogs))
}

/// Aggregate statistics over the whole collection.
#[utoipa::path(
    get,
    path = "/api/v1/blogs/stats",
    responses(
        (status = 200, description = "Collection statistics", body = BlogStatsSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "blogStats",
    security([])
)]
#[get("/blogs/stats")]
pub async fn blog_stats(state: web::Data<HttpState>) -> ApiResult<web::Json<BlogStats>> {
    let stats = state.blogs_query.blog_stats().await?;
    Ok(web::Json(stats))
}

/// Fetch a single blog.
#[utoipa::path(
    get,
    path = "/api/v1/blogs/{id}",
    params(("id" = String, Path, description = "Blog identifier (UUID)")),
    responses(
        (status = 200, description = "Blog", body = PopulatedBlogSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "getBlog",
    security([])
)]
#[get("/blogs/{id}")]
pub async fn get_blog(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PopulatedBlog>> {
    let id = parse_blog_id(&path.into_inner(), ID_FIELD)?;
    let blog = state.blogs_query.get_blog(&id).await?;
    Ok(web::Json(blog))
}

/// Create a blog owned by the authenticated caller.
#[utoipa::path(
    post,
    path = "/api/v1/blogs",
    request_body = BlogRequestBody,
    responses(
        (status = 201, description = "Created", body = BlogSchema),
        (status = 400, description = "Missing required field", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "createBlog",
    security(("BearerToken" = []))
)]
#[post("/blogs")]
pub async fn create_blog(
    state: web::Data<HttpState>,
    credential: BearerCredential,
    payload: web::Json<BlogRequestBody>,
) -> ApiResult<HttpResponse> {
    let blog: Blog = state
        .blogs
        .create_blog(CreateBlogRequest {
            credential: credential.into_inner(),
            draft: payload.into_inner().into(),
        })
        .await?;
    Ok(HttpResponse::Created().json(blog))
}

/// Replace a blog's title, author, url and likes.
///
/// Whether a bearer token is required depends on the configured update
/// access mode.
#[utoipa::path(
    put,
    path = "/api/v1/blogs/{id}",
    params(("id" = String, Path, description = "Blog identifier (UUID)")),
    request_body = BlogRequestBody,
    responses(
        (status = 200, description = "Updated", body = BlogSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Not the creator", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "updateBlog"
)]
#[put("/blogs/{id}")]
pub async fn update_blog(
    state: web::Data<HttpState>,
    credential: BearerCredential,
    path: web::Path<String>,
    payload: web::Json<BlogRequestBody>,
) -> ApiResult<web::Json<Blog>> {
    let id = parse_blog_id(&path.into_inner(), ID_FIELD)?;
    let blog = state
        .blogs
        .update_blog(UpdateBlogRequest {
            id,
            credential: credential.into_inner(),
            draft: payload.into_inner().into(),
        })
        .await?;
    Ok(web::Json(blog))
}

/// Replace a blog's comment list wholesale.
#[utoipa::path(
    put,
    path = "/api/v1/blogs/{id}/comments",
    params(("id" = String, Path, description = "Blog identifier (UUID)")),
    request_body = CommentsRequestBody,
    responses(
        (status = 200, description = "Updated", body = BlogSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "replaceComments",
    security([])
)]
#[put("/blogs/{id}/comments")]
pub async fn replace_comments(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CommentsRequestBody>,
) -> ApiResult<web::Json<Blog>> {
    let id = parse_blog_id(&path.into_inner(), ID_FIELD)?;
    let blog = state
        .blogs
        .replace_comments(ReplaceCommentsRequest {
            id,
            comments: payload.into_inner().comments,
        })
        .await?;
    Ok(web::Json(blog))
}

/// Delete a blog owned by the authenticated caller.
#[utoipa::path(
    delete,
    path = "/api/v1/blogs/{id}",
    params(("id" = String, Path, description = "Blog identifier (UUID)")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Not the creator", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "deleteBlog",
    security(("BearerToken" = []))
)]
#[delete("/blogs/{id}")]
pub async fn delete_blog(
    state: web::Data<HttpState>,
    credential: BearerCredential,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_blog_id(&path.into_inner(), ID_FIELD)?;
    state
        .blogs
        .delete_blog(DeleteBlogRequest {
            id,
            credential: credential.into_inner(),
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "blogs_tests.rs"]
mod tests;
