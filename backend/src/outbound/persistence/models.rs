//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{blogs, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub blog_ids: Vec<Uuid>,
    #[expect(dead_code, reason = "ordering column, not mapped into the domain")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub blog_ids: Vec<Uuid>,
}

/// Row struct for reading from the blogs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = blogs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BlogRow {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: i64,
    pub comments: Vec<String>,
    pub owner_id: Option<Uuid>,
    #[expect(dead_code, reason = "ordering column, not mapped into the domain")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new blog records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = blogs)]
pub(crate) struct NewBlogRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub author: Option<&'a str>,
    pub url: Option<&'a str>,
    pub likes: i64,
    pub comments: Vec<String>,
    pub owner_id: Option<Uuid>,
}

/// Changeset for the caller-controlled blog fields.
///
/// `None` clears the column rather than leaving it untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = blogs)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct BlogFieldsUpdate<'a> {
    pub title: &'a str,
    pub author: Option<&'a str>,
    pub url: Option<&'a str>,
    pub likes: i64,
}
