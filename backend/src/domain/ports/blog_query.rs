//! Driving port for read-only blog use-cases.

use async_trait::async_trait;

use crate::domain::analytics::BlogStats;
use crate::domain::{BlogId, Error, PopulatedBlog};

/// Domain use-case port for reading blogs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogQuery: Send + Sync {
    /// Every blog with its owner expanded to a summary.
    async fn list_blogs(&self) -> Result<Vec<PopulatedBlog>, Error>;

    /// One blog with its owner expanded, or `not_found`.
    async fn get_blog(&self, id: &BlogId) -> Result<PopulatedBlog, Error>;

    /// Aggregate statistics over the current collection.
    async fn blog_stats(&self) -> Result<BlogStats, Error>;
}
