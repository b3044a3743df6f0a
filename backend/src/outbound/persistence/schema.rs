//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Encoded salted password digest.
        password_hash -> Text,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Issued bearer tokens, stored by SHA-256 fingerprint only.
    access_tokens (fingerprint) {
        fingerprint -> Varchar,
        user_id -> Uuid,
        issued_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only bond records. `id` order is insertion order.
    bonds (id) {
        id -> Int8,
        owner_id -> Uuid,
        isin -> Text,
        size -> Int8,
        currency -> Text,
        maturity -> Date,
        lei -> Varchar,
        legal_name -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(access_tokens -> users (user_id));
diesel::joinable!(bonds -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(users, access_tokens, bonds);
