//! Handlers for the `/players` registry lookups.
//!
//! These are public: an account owner looks a player up before deciding
//! whether to register them.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tournoi_core::error::CoreError;
use tournoi_core::players::{normalize_name, normalize_permit_id, shortlist};

use crate::error::AppResult;
use crate::registry::Player;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /players`.
#[derive(Debug, Deserialize)]
pub struct PlayerSearchRequest {
    #[serde(default, alias = "surname")]
    pub last_name: String,
    #[serde(default, alias = "name")]
    pub first_name: String,
}

/// Response body for `POST /players`.
#[derive(Debug, Serialize)]
pub struct PlayerSearchResponse {
    pub players: Vec<Player>,
}

/// GET /api/v1/players/{permit_id}
pub async fn get_by_permit_id(
    State(state): State<AppState>,
    Path(permit_id): Path<String>,
) -> AppResult<Json<DataResponse<Player>>> {
    let permit_id = normalize_permit_id(&permit_id)?;
    let player = state.registry.find_player(&permit_id).await?;
    Ok(Json(DataResponse { data: player }))
}

/// POST /api/v1/players
///
/// Search by last and first name. Players without a club are left out and
/// at most ten are returned, in registry order.
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<PlayerSearchRequest>, JsonRejection>,
) -> AppResult<Json<PlayerSearchResponse>> {
    let Json(request) = payload?;
    let last_name = normalize_name(&request.last_name);
    let first_name = normalize_name(&request.first_name);
    if last_name.is_empty() && first_name.is_empty() {
        return Err(CoreError::Validation(
            "last_name or first_name is required".to_string(),
        )
        .into());
    }

    let found = state
        .registry
        .search_players(&last_name, &first_name)
        .await?;
    let total = found.len();
    let players = shortlist(found, Player::has_club);
    tracing::debug!(total, returned = players.len(), "Player search");

    Ok(Json(PlayerSearchResponse { players }))
}
