//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel row structs and domain
//! types; they contain no business logic. Row structs (`models.rs`) and the
//! schema (`schema.rs`) stay private to this module. Connections come from a
//! `bb8` pool driven by `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use bloglist::outbound::persistence::{DbPool, DieselBlogRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bloglist")).await?;
//! let blogs = DieselBlogRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_blog_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_blog_repository::DieselBlogRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
