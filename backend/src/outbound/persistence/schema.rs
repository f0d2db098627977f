//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique, trimmed login name (max 150 characters).
        username -> Varchar,
        /// bcrypt hash in modular crypt format.
        password_hash -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// User-authored snippets.
    snippets (id) {
        id -> Uuid,
        description -> Text,
        owner_id -> Uuid,
        /// Owner's user name at creation time.
        author -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(snippets -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(snippets, users);
