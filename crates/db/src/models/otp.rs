//! One-time login code model.

use sqlx::FromRow;
use tournoi_core::types::{DbId, Timestamp};

/// A row from the `otps` table. Only the digest of the code is stored.
#[derive(Debug, Clone, FromRow)]
pub struct Otp {
    pub id: DbId,
    pub email: String,
    pub secret_hash: String,
    pub expires_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
