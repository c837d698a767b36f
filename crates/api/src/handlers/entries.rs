//! Handlers for a member's band entries: availability, confirmation and
//! history.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tournoi_core::types::DbId;
use tournoi_db::models::entry_event::EntryHistoryItem;
use tournoi_db::repositories::EntryEventRepo;
use uuid::Uuid;

use crate::engine::{self, AvailabilityReport};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::notifications;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /members/{id}/set-entries`.
#[derive(Debug, Deserialize)]
pub struct SetEntriesRequest {
    /// The complete set of bands the member should end up entered in.
    #[serde(alias = "bandIds")]
    pub band_ids: Vec<DbId>,
    /// Session returned by the availability call that placed the holds.
    #[serde(alias = "sessionId")]
    pub session_id: Uuid,
}

/// Response body for `GET /members/{id}/get-entries-history`.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<EntryHistoryItem>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/members/{id}/band-availabilities
///
/// Returns live capacity for every eligible band and places holds under a
/// new session id. Calling it again supersedes the caller's earlier holds.
pub async fn band_availabilities(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(member_id): Path<DbId>,
) -> AppResult<Json<AvailabilityReport>> {
    let report = engine::compute_availability(
        &state.pool,
        auth.principal(),
        member_id,
        state.config.entry_hold(),
    )
    .await?;
    Ok(Json(report))
}

/// POST /api/v1/members/{id}/set-entries
///
/// Replace the member's confirmed entries with `band_ids`. Responds 200 with
/// an empty body.
pub async fn set_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(member_id): Path<DbId>,
    payload: Result<Json<SetEntriesRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(input) = payload?;

    let outcome = engine::confirm_entries(
        &state.pool,
        auth.principal(),
        member_id,
        &input.band_ids,
        input.session_id,
    )
    .await?;

    if !outcome.confirmed.is_empty() {
        notifications::spawn_first_confirmation_notice(&state, outcome.member);
    }

    Ok(StatusCode::OK)
}

/// GET /api/v1/members/{id}/get-entries-history
///
/// Admin only. Chronological created/deleted feed of the member's
/// confirmed entries.
pub async fn entries_history(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(member_id): Path<DbId>,
) -> AppResult<Json<HistoryResponse>> {
    let history = EntryEventRepo::history_for_member(&state.pool, member_id).await?;
    Ok(Json(HistoryResponse { history }))
}
