//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. When a
//! migration changes the schema, regenerate them with `diesel print-schema`
//! or update them by hand.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique login name, at least three characters.
        username -> Varchar,
        name -> Varchar,
        /// Encoded Argon2 hash; never leaves the persistence layer as text.
        password_hash -> Text,
        /// Owned blog ids in creation order.
        blog_ids -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blog entries.
    blogs (id) {
        id -> Uuid,
        title -> Text,
        author -> Nullable<Text>,
        url -> Nullable<Text>,
        likes -> Int8,
        comments -> Array<Text>,
        /// Owning user; null for legacy rows or after the owner is removed.
        owner_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(blogs -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(blogs, users);
