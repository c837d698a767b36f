//! Repository for the `otps` table.

use sqlx::PgPool;
use tournoi_core::types::Timestamp;

use crate::models::otp::Otp;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, secret_hash, expires_at, deleted_at, created_at, updated_at";

/// Stores and consumes one-time login codes.
pub struct OtpRepo;

impl OtpRepo {
    /// Store a new code digest for `email`.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        secret_hash: &str,
        expires_at: Timestamp,
    ) -> Result<Otp, sqlx::Error> {
        let query = format!(
            "INSERT INTO otps (email, secret_hash, expires_at) VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Otp>(&query)
            .bind(email)
            .bind(secret_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// The most recent unexpired, unused code for `email`, if any.
    pub async fn find_active(
        pool: &PgPool,
        email: &str,
        now: Timestamp,
    ) -> Result<Option<Otp>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM otps \
             WHERE email = $1 AND expires_at > $2 AND deleted_at IS NULL \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Otp>(&query)
            .bind(email)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Atomically consume a matching live code.
    ///
    /// Uses `FOR UPDATE SKIP LOCKED` so a code can be redeemed by at most
    /// one concurrent login. Returns `None` when nothing matched.
    pub async fn consume(
        pool: &PgPool,
        email: &str,
        secret_hash: &str,
        now: Timestamp,
    ) -> Result<Option<Otp>, sqlx::Error> {
        let query = format!(
            "UPDATE otps SET deleted_at = NOW() \
             WHERE id = ( \
                 SELECT id FROM otps \
                 WHERE email = $1 AND secret_hash = $2 AND expires_at > $3 AND deleted_at IS NULL \
                 ORDER BY created_at DESC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Otp>(&query)
            .bind(email)
            .bind(secret_hash)
            .bind(now)
            .fetch_optional(pool)
            .await
    }
}
