//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process repositories for development and tests
//! - **token**: JWT bearer credentials
//! - **hashing**: Argon2 password hashes
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod hashing;
pub mod memory;
pub mod persistence;
pub mod token;
