//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Pagination and search parameters for the member listing
/// (`?limit=&offset=&search=&permit_id=`).
///
/// Limits are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Default, Deserialize)]
pub struct MemberListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
    pub permit_id: Option<String>,
}

/// Optional `?day=` filter for the band listing.
#[derive(Debug, Default, Deserialize)]
pub struct DayParams {
    pub day: Option<i16>,
}
