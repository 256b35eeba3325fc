//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{BlogId, CredentialSecret, PersonName, User, UserId, Username};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const USERNAME_CONSTRAINT: &str = "users_username_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Convert a database row into a domain user.
///
/// Rows violating domain invariants indicate a schema drift and surface as
/// query errors.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let username = Username::new(&row.username).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored username violates invariants");
        UserPersistenceError::query("stored user is invalid")
    })?;
    let name = PersonName::new(row.name).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored name violates invariants");
        UserPersistenceError::query("stored user is invalid")
    })?;
    let blogs = row.blog_ids.into_iter().map(BlogId::from_uuid).collect();
    Ok(User::new(
        UserId::from_uuid(row.id),
        username,
        name,
        CredentialSecret::new(row.password_hash),
    )
    .with_blogs(blogs))
}

fn rows_to_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserPersistenceError> {
    rows.into_iter().map(row_to_user).collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            name: user.name().as_ref(),
            password_hash: user.credential_secret().expose(),
            blog_ids: user.blogs().iter().map(|id| *id.as_uuid()).collect(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err, USERNAME_CONSTRAINT) {
                    UserPersistenceError::duplicate_username(user.username().as_ref())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(*id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(uuids))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_users(rows)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_users(rows)
    }

    async fn save_blog_ids(
        &self,
        id: &UserId,
        blogs: &[BlogId],
    ) -> Result<(), UserPersistenceError> {
        let blog_ids: Vec<Uuid> = blogs.iter().map(|blog| *blog.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(users::table.filter(users::id.eq(*id.as_uuid())))
            .set(users::blog_ids.eq(blog_ids))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    fn row(username: &str, name: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            name: name.to_owned(),
            password_hash: "$argon2id$v=19$stub".to_owned(),
            blog_ids: vec![Uuid::new_v4()],
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn rows_map_to_domain_users() {
        let source = row("hellas", "Arto Hellas");
        let blog = source.blog_ids[0];

        let user = row_to_user(source).expect("valid row");

        assert_eq!(user.username().as_ref(), "hellas");
        assert_eq!(user.blogs(), [BlogId::from_uuid(blog)]);
        assert_eq!(user.credential_secret().expose(), "$argon2id$v=19$stub");
    }

    #[rstest]
    #[case("ab", "Arto Hellas")]
    #[case("hellas", "  ")]
    fn invalid_rows_surface_as_query_errors(#[case] username: &str, #[case] name: &str) {
        let err = row_to_user(row(username, name)).expect_err("invalid row");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
