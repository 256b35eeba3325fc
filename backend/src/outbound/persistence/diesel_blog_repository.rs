//! PostgreSQL-backed `BlogRepository` implementation using Diesel ORM.
//!
//! Each method touches a single row, so Postgres row-level atomicity is all
//! the consistency the blog service relies on.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{BlogRepository, BlogRepositoryError};
use crate::domain::{Blog, BlogFields, BlogId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BlogFieldsUpdate, BlogRow, NewBlogRow};
use super::pool::{DbPool, PoolError};
use super::schema::blogs;

/// Diesel-backed implementation of the `BlogRepository` port.
#[derive(Clone)]
pub struct DieselBlogRepository {
    pool: DbPool,
}

impl DieselBlogRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BlogRepositoryError {
    map_basic_pool_error(error, BlogRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BlogRepositoryError {
    map_basic_diesel_error(
        error,
        BlogRepositoryError::query,
        BlogRepositoryError::connection,
    )
}

fn likes_for_db(likes: u64) -> Result<i64, BlogRepositoryError> {
    i64::try_from(likes).map_err(|_| BlogRepositoryError::query("likes exceed storage range"))
}

/// Convert a database row to a domain blog.
fn row_to_blog(row: BlogRow) -> Blog {
    let likes = u64::try_from(row.likes).unwrap_or_else(|_| {
        warn!(blog_id = %row.id, likes = row.likes, "negative likes in storage, reading as 0");
        0
    });
    let fields = BlogFields {
        title: row.title,
        author: row.author,
        url: row.url,
        likes,
    };
    Blog::new(
        BlogId::from_uuid(row.id),
        fields,
        row.owner_id.map(UserId::from_uuid),
    )
    .with_comments(row.comments)
}

#[async_trait]
impl BlogRepository for DieselBlogRepository {
    async fn list(&self) -> Result<Vec<Blog>, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BlogRow> = blogs::table
            .order((blogs::created_at.asc(), blogs::id.asc()))
            .select(BlogRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_blog).collect())
    }

    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<BlogRow> = blogs::table
            .filter(blogs::id.eq(*id.as_uuid()))
            .select(BlogRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_blog))
    }

    async fn insert(&self, blog: &Blog) -> Result<(), BlogRepositoryError> {
        let row = NewBlogRow {
            id: *blog.id().as_uuid(),
            title: blog.title(),
            author: blog.author(),
            url: blog.url(),
            likes: likes_for_db(blog.likes())?,
            comments: blog.comments().to_vec(),
            owner_id: blog.owner().map(|owner| *owner.as_uuid()),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(blogs::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn replace_fields(
        &self,
        id: &BlogId,
        fields: &BlogFields,
    ) -> Result<Option<Blog>, BlogRepositoryError> {
        let changes = BlogFieldsUpdate {
            title: fields.title.as_str(),
            author: fields.author.as_deref(),
            url: fields.url.as_deref(),
            likes: likes_for_db(fields.likes)?,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<BlogRow> = diesel::update(blogs::table.filter(blogs::id.eq(*id.as_uuid())))
            .set(&changes)
            .returning(BlogRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_blog))
    }

    async fn replace_comments(
        &self,
        id: &BlogId,
        comments: &[String],
    ) -> Result<Option<Blog>, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<BlogRow> = diesel::update(blogs::table.filter(blogs::id.eq(*id.as_uuid())))
            .set(blogs::comments.eq(comments.to_vec()))
            .returning(BlogRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_blog))
    }

    async fn delete(&self, id: &BlogId) -> Result<bool, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(blogs::table.filter(blogs::id.eq(*id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list_ids_by_owner(&self, owner: &UserId) -> Result<Vec<BlogId>, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<Uuid> = blogs::table
            .filter(blogs::owner_id.eq(*owner.as_uuid()))
            .order((blogs::created_at.asc(), blogs::id.asc()))
            .select(blogs::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(ids.into_iter().map(BlogId::from_uuid).collect())
    }
}
