//! Port for blog persistence.

use async_trait::async_trait;

use crate::domain::{Blog, BlogFields, BlogId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by blog repository adapters.
    pub enum BlogRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "blog repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "blog repository query failed: {message}",
    }
}

/// Document-style blog storage.
///
/// Every method is atomic for the single blog it touches. Nothing spans more
/// than one record, so callers must tolerate interleaving with other writers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// All blogs in insertion order.
    async fn list(&self) -> Result<Vec<Blog>, BlogRepositoryError>;

    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, BlogRepositoryError>;

    /// Store a new blog. The id is assigned by the caller.
    async fn insert(&self, blog: &Blog) -> Result<(), BlogRepositoryError>;

    /// Overwrite the caller-controlled fields, returning the updated blog or
    /// `None` when no blog has `id`.
    async fn replace_fields(
        &self,
        id: &BlogId,
        fields: &BlogFields,
    ) -> Result<Option<Blog>, BlogRepositoryError>;

    /// Overwrite the comment list, returning the updated blog or `None` when
    /// no blog has `id`.
    async fn replace_comments(
        &self,
        id: &BlogId,
        comments: &[String],
    ) -> Result<Option<Blog>, BlogRepositoryError>;

    /// Remove a blog. Returns whether a record was deleted.
    async fn delete(&self, id: &BlogId) -> Result<bool, BlogRepositoryError>;

    /// Ids of every blog currently owned by `owner`, in insertion order.
    async fn list_ids_by_owner(&self, owner: &UserId) -> Result<Vec<BlogId>, BlogRepositoryError>;
}
