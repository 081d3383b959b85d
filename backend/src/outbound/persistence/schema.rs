//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Identity store.
    users (id) {
        id -> Uuid,
        /// Normalised email, unique across users.
        email -> Varchar,
        name -> Nullable<Varchar>,
        /// `member` or `admin`.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job postings. `owner_user_id` never changes after insert.
    jobs (id) {
        id -> Uuid,
        title -> Varchar,
        company -> Varchar,
        location -> Nullable<Varchar>,
        description -> Nullable<Text>,
        owner_user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registration ledger, unique on `(job_id, email)`.
    registrations (id) {
        id -> Uuid,
        job_id -> Uuid,
        email -> Varchar,
        created_at -> Timestamptz,
        /// Insertion order; breaks `created_at` ties.
        seq -> Int8,
    }
}

diesel::joinable!(jobs -> users (owner_user_id));
diesel::joinable!(registrations -> jobs (job_id));

diesel::allow_tables_to_appear_in_same_query!(users, jobs, registrations);
