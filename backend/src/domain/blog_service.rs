//! Ownership-enforcing blog services.
//!
//! The service implements both blog driving ports. Writes that need a caller
//! identity resolve the bearer credential through the [`IdentityVerifier`]
//! port; ownership is compared on the normalized identity string.
//!
//! Nothing here holds a lock across an await. Two deletes for the same owner
//! may interleave; each recomputes the owner's blog list from the store, so
//! the final list reflects whichever write lands last.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use super::analytics::{self, BlogStats};
use super::user_service::map_user_persistence_error;
use crate::domain::ports::{
    BlogCommand, BlogQuery, BlogRepository, BlogRepositoryError, CreateBlogRequest,
    DeleteBlogRequest, DeleteBlogResponse, IdentityError, IdentityVerifier,
    ReplaceCommentsRequest, UpdateBlogRequest, UserRepository,
};
use crate::domain::{
    Blog, BlogDraft, BlogFields, BlogId, BlogPolicy, BlogValidationError, Credential, Error,
    LIKES_MAX, OwnerSummary, PopulatedBlog, UpdateAccess, UserId,
};

fn map_repository_error(error: BlogRepositoryError) -> Error {
    match error {
        BlogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("blog repository unavailable: {message}"))
        }
        BlogRepositoryError::Query { message } => {
            Error::internal(format!("blog repository error: {message}"))
        }
    }
}

fn map_identity_error(error: IdentityError) -> Error {
    match error {
        IdentityError::InvalidCredential { message } => {
            warn!(reason = %message, "credential rejected");
            Error::unauthorized("token invalid")
        }
        IdentityError::Issuance { message } => {
            Error::internal(format!("identity verifier error: {message}"))
        }
    }
}

fn map_validation_error(error: BlogValidationError) -> Error {
    let details = match error {
        BlogValidationError::MissingField(field) => json!({
            "field": field.as_str(),
            "code": "missing_field",
        }),
        BlogValidationError::OutOfRange(field) => json!({
            "field": field.as_str(),
            "code": "out_of_range",
            "max": LIKES_MAX,
        }),
    };
    Error::invalid_request(error.to_string()).with_details(details)
}

fn blog_not_found(id: &BlogId) -> Error {
    Error::not_found(format!("blog {id} not found"))
}

/// Blog service implementing [`BlogQuery`] and [`BlogCommand`].
#[derive(Clone)]
pub struct BlogService<B, U, V> {
    blogs: Arc<B>,
    users: Arc<U>,
    verifier: Arc<V>,
    policy: BlogPolicy,
}

impl<B, U, V> BlogService<B, U, V> {
    /// Create a service over the given repositories and verifier.
    pub fn new(blogs: Arc<B>, users: Arc<U>, verifier: Arc<V>, policy: BlogPolicy) -> Self {
        Self {
            blogs,
            users,
            verifier,
            policy,
        }
    }
}

impl<B, U, V> BlogService<B, U, V>
where
    B: BlogRepository,
    U: UserRepository,
    V: IdentityVerifier,
{
    async fn authenticate(&self, credential: Option<&Credential>) -> Result<UserId, Error> {
        let credential = credential.ok_or_else(|| Error::unauthorized("token missing"))?;
        self.verifier
            .resolve(credential)
            .await
            .map_err(map_identity_error)
    }

    async fn find_blog(&self, id: &BlogId) -> Result<Blog, Error> {
        self.blogs
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| blog_not_found(id))
    }

    /// Resolve the caller and confirm they own the blog.
    async fn authorize_owner(
        &self,
        id: &BlogId,
        credential: Option<&Credential>,
    ) -> Result<(UserId, Blog), Error> {
        let caller = self.authenticate(credential).await?;
        let blog = self.find_blog(id).await?;
        if !blog.is_owned_by(&caller) {
            warn!(blog_id = %id, caller = %caller, "ownership check failed");
            return Err(Error::forbidden("only the creator can modify this blog"));
        }
        Ok((caller, blog))
    }

    fn validate(&self, draft: BlogDraft) -> Result<BlogFields, Error> {
        self.policy.fields.validate(draft).map_err(map_validation_error)
    }

    /// Expand owner references into summaries with a single batched lookup.
    async fn populate(&self, blogs: Vec<Blog>) -> Result<Vec<PopulatedBlog>, Error> {
        let mut seen = HashSet::new();
        let owner_ids: Vec<UserId> = blogs
            .iter()
            .filter_map(Blog::owner)
            .filter(|owner| seen.insert(**owner))
            .copied()
            .collect();

        let owners: HashMap<UserId, OwnerSummary> = if owner_ids.is_empty() {
            HashMap::new()
        } else {
            self.users
                .find_by_ids(&owner_ids)
                .await
                .map_err(map_user_persistence_error)?
                .iter()
                .map(|user| (*user.id(), user.summary()))
                .collect()
        };

        Ok(blogs
            .into_iter()
            .map(|blog| {
                let owner = blog.owner().and_then(|id| owners.get(id)).cloned();
                PopulatedBlog { blog, owner }
            })
            .collect())
    }
}

#[async_trait]
impl<B, U, V> BlogQuery for BlogService<B, U, V>
where
    B: BlogRepository,
    U: UserRepository,
    V: IdentityVerifier,
{
    async fn list_blogs(&self) -> Result<Vec<PopulatedBlog>, Error> {
        let blogs = self.blogs.list().await.map_err(map_repository_error)?;
        self.populate(blogs).await
    }

    async fn get_blog(&self, id: &BlogId) -> Result<PopulatedBlog, Error> {
        let blog = self.find_blog(id).await?;
        self.populate(vec![blog])
            .await?
            .pop()
            .ok_or_else(|| blog_not_found(id))
    }

    async fn blog_stats(&self) -> Result<BlogStats, Error> {
        let blogs = self.blogs.list().await.map_err(map_repository_error)?;
        Ok(analytics::summarize(&blogs))
    }
}

#[async_trait]
impl<B, U, V> BlogCommand for BlogService<B, U, V>
where
    B: BlogRepository,
    U: UserRepository,
    V: IdentityVerifier,
{
    async fn create_blog(&self, request: CreateBlogRequest) -> Result<Blog, Error> {
        let owner_id = self.authenticate(request.credential.as_ref()).await?;
        let fields = self.validate(request.draft)?;

        let mut owner = self
            .users
            .find_by_id(&owner_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| {
                warn!(user_id = %owner_id, "credential names a missing user");
                Error::unauthorized("token does not identify an existing user")
            })?;

        let blog = Blog::new(BlogId::random(), fields, Some(owner_id));
        self.blogs
            .insert(&blog)
            .await
            .map_err(map_repository_error)?;

        owner.push_blog(*blog.id());
        self.users
            .save_blog_ids(owner.id(), owner.blogs())
            .await
            .map_err(map_user_persistence_error)?;

        info!(blog_id = %blog.id(), owner = %owner_id, "blog created");
        Ok(blog)
    }

    async fn update_blog(&self, request: UpdateBlogRequest) -> Result<Blog, Error> {
        let UpdateBlogRequest {
            id,
            credential,
            draft,
        } = request;

        if self.policy.update_access == UpdateAccess::OwnerOnly {
            self.authorize_owner(&id, credential.as_ref()).await?;
        }
        let fields = self.validate(draft)?;

        let updated = self
            .blogs
            .replace_fields(&id, &fields)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| blog_not_found(&id))?;

        info!(blog_id = %id, "blog updated");
        Ok(updated)
    }

    async fn replace_comments(&self, request: ReplaceCommentsRequest) -> Result<Blog, Error> {
        let ReplaceCommentsRequest { id, comments } = request;
        let updated = self
            .blogs
            .replace_comments(&id, &comments)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| blog_not_found(&id))?;

        info!(blog_id = %id, comments = updated.comments().len(), "comments replaced");
        Ok(updated)
    }

    async fn delete_blog(&self, request: DeleteBlogRequest) -> Result<DeleteBlogResponse, Error> {
        let (owner_id, blog) = self
            .authorize_owner(&request.id, request.credential.as_ref())
            .await?;

        let removed = self
            .blogs
            .delete(&request.id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(blog_not_found(&request.id));
        }

        let remaining = self
            .blogs
            .list_ids_by_owner(&owner_id)
            .await
            .map_err(map_repository_error)?;
        self.users
            .save_blog_ids(&owner_id, &remaining)
            .await
            .map_err(map_user_persistence_error)?;

        info!(blog_id = %request.id, owner = %owner_id, "blog deleted");
        Ok(DeleteBlogResponse { deleted: blog })
    }
}

#[cfg(test)]
#[path = "blog_service_tests.rs"]
mod tests;
