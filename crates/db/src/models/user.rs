//! Account model. An account owns members and is the acting principal
//! stamped on every ledger mutation.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tournoi_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an account directly (seeding and tests). Accounts made
/// by the login flow are never admins.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub is_admin: bool,
}
