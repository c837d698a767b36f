//! Handlers for the band catalog.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tournoi_core::bands::validate_day;
use tournoi_core::error::CoreError;
use tournoi_core::types::DbId;
use tournoi_db::models::band::{Band, CreateBand};
use tournoi_db::repositories::BandRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::DayParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/bands?day=
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<DayParams>,
) -> AppResult<Json<DataResponse<Vec<Band>>>> {
    if let Some(day) = params.day {
        validate_day(day)?;
    }
    let bands = BandRepo::list(&state.pool, params.day).await?;
    Ok(Json(DataResponse { data: bands }))
}

/// GET /api/v1/admin/bands/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Band>>> {
    let band = BandRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Band", id }))?;
    Ok(Json(DataResponse { data: band }))
}

/// POST /api/v1/admin/bands
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    payload: Result<Json<CreateBand>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<Band>>)> {
    let Json(input) = payload?;
    input.validate()?;

    let band = BandRepo::create(&state.pool, &input).await?;
    tracing::info!(band_id = band.id, name = %band.name, admin_id = admin.user_id, "Band created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: band })))
}
