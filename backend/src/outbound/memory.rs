//! In-process store implementing both repository ports.
//!
//! Used when no database URL is configured and by the HTTP tests. Each port
//! call takes the lock once, so every method is atomic on its own while
//! sequences of calls may interleave, matching the Postgres adapters.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    BlogRepository, BlogRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{Blog, BlogFields, BlogId, User, UserId};

#[derive(Debug, Default)]
struct State {
    blogs: Vec<Blog>,
    users: Vec<User>,
}

/// Shared in-memory store. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Blog>, BlogRepositoryError> {
        Ok(self.state.read().await.blogs.clone())
    }

    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, BlogRepositoryError> {
        let state = self.state.read().await;
        Ok(state.blogs.iter().find(|blog| blog.id() == id).cloned())
    }

    async fn insert(&self, blog: &Blog) -> Result<(), BlogRepositoryError> {
        let mut state = self.state.write().await;
        if state.blogs.iter().any(|existing| existing.id() == blog.id()) {
            return Err(BlogRepositoryError::query(format!(
                "blog {} already exists",
                blog.id()
            )));
        }
        state.blogs.push(blog.clone());
        Ok(())
    }

    async fn replace_fields(
        &self,
        id: &BlogId,
        fields: &BlogFields,
    ) -> Result<Option<Blog>, BlogRepositoryError> {
        let mut state = self.state.write().await;
        let Some(slot) = state.blogs.iter_mut().find(|blog| blog.id() == id) else {
            return Ok(None);
        };
        *slot = slot.clone().with_fields(fields.clone());
        Ok(Some(slot.clone()))
    }

    async fn replace_comments(
        &self,
        id: &BlogId,
        comments: &[String],
    ) -> Result<Option<Blog>, BlogRepositoryError> {
        let mut state = self.state.write().await;
        let Some(slot) = state.blogs.iter_mut().find(|blog| blog.id() == id) else {
            return Ok(None);
        };
        *slot = slot.clone().with_comments(comments.to_vec());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &BlogId) -> Result<bool, BlogRepositoryError> {
        let mut state = self.state.write().await;
        let before = state.blogs.len();
        state.blogs.retain(|blog| blog.id() != id);
        Ok(state.blogs.len() < before)
    }

    async fn list_ids_by_owner(&self, owner: &UserId) -> Result<Vec<BlogId>, BlogRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .blogs
            .iter()
            .filter(|blog| blog.is_owned_by(owner))
            .map(|blog| *blog.id())
            .collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.state.write().await;
        if state
            .users
            .iter()
            .any(|existing| existing.username() == user.username())
        {
            return Err(UserPersistenceError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|user| user.username().as_ref() == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .filter(|user| ids.contains(user.id()))
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.state.read().await.users.clone())
    }

    async fn save_blog_ids(
        &self,
        id: &UserId,
        blogs: &[BlogId],
    ) -> Result<(), UserPersistenceError> {
        let mut state = self.state.write().await;
        if let Some(slot) = state.users.iter_mut().find(|user| user.id() == id) {
            *slot = slot.clone().with_blogs(blogs.to_vec());
        }
        Ok(())
    }
}
