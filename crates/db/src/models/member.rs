//! Member (competitor) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tournoi_core::bands::Sex;
use tournoi_core::error::CoreError;
use tournoi_core::types::{DbId, Timestamp};

/// A row from the `members` table (active rows only are ever returned).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub user_id: DbId,
    pub permit_id: String,
    pub first_name: String,
    pub last_name: String,
    pub sex: String,
    pub points: f64,
    pub category: Option<String>,
    pub club_name: Option<String>,
    pub permit_type: Option<String>,
    pub notified_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Member {
    pub fn member_sex(&self) -> Result<Sex, CoreError> {
        self.sex.parse()
    }
}

/// Request body for `POST /members`. Everything else about the member is
/// looked up in the player registry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMemberRequest {
    pub permit_id: String,
}

/// A member ready to insert, as resolved from the player registry.
#[derive(Debug, Clone)]
pub struct CreateMember {
    pub permit_id: String,
    pub first_name: String,
    pub last_name: String,
    pub sex: Sex,
    pub points: f64,
    pub category: Option<String>,
    pub club_name: Option<String>,
    pub permit_type: Option<String>,
}

/// Filters for the member listing.
#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    /// Restrict to members owned by this account; `None` lists everyone.
    pub owner_id: Option<DbId>,
    /// `ILIKE` pattern matched against last name, first name and club.
    pub search_pattern: Option<String>,
    pub permit_id: Option<String>,
}

/// A confirmed entry as shown in the member listing.
///
/// `band_rank` is the entry's position in its band ordered by confirmation
/// time; a rank above `band_max_entries` means the member is on the
/// waiting list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MemberEntrySummary {
    pub member_id: DbId,
    pub band_id: DbId,
    pub band_name: String,
    pub band_price: i32,
    pub band_max_entries: i32,
    pub band_rank: i64,
    pub confirmed_at: Option<Timestamp>,
}
