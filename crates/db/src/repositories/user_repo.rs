//! Repository for the `users` table.

use sqlx::PgPool;
use tournoi_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, is_admin, created_at, updated_at";

/// Provides lookups and creation for accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new account, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, is_admin) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    /// Find an account by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Return the account for `email`, creating a non-admin one if absent.
    ///
    /// Uses an upsert so two concurrent first logins converge on one row.
    pub async fn find_or_create_by_email(pool: &PgPool, email: &str) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email) VALUES ($1) \
             ON CONFLICT ON CONSTRAINT uq_users_email DO UPDATE SET email = EXCLUDED.email \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_one(pool)
            .await
    }
}
