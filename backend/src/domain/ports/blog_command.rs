//! Driving port for blog mutations.
//!
//! Requests carry the caller's bearer credential, when one was presented, so
//! the service decides whether the operation needs it.

use async_trait::async_trait;

use crate::domain::{Blog, BlogDraft, BlogId, Credential, Error};

#[derive(Debug, Clone)]
pub struct CreateBlogRequest {
    pub credential: Option<Credential>,
    pub draft: BlogDraft,
}

#[derive(Debug, Clone)]
pub struct UpdateBlogRequest {
    pub id: BlogId,
    pub credential: Option<Credential>,
    pub draft: BlogDraft,
}

#[derive(Debug, Clone)]
pub struct ReplaceCommentsRequest {
    pub id: BlogId,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DeleteBlogRequest {
    pub id: BlogId,
    pub credential: Option<Credential>,
}

/// Outcome of a delete, carrying the record as it was before removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteBlogResponse {
    pub deleted: Blog,
}

/// Domain use-case port for changing blogs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogCommand: Send + Sync {
    async fn create_blog(&self, request: CreateBlogRequest) -> Result<Blog, Error>;

    async fn update_blog(&self, request: UpdateBlogRequest) -> Result<Blog, Error>;

    async fn replace_comments(&self, request: ReplaceCommentsRequest) -> Result<Blog, Error>;

    async fn delete_blog(&self, request: DeleteBlogRequest) -> Result<DeleteBlogResponse, Error>;
}
