//! Handlers for the `/members` resource.
//!
//! Non-admin callers only ever see members owned by their account; any other
//! member id answers 404 rather than 403.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tournoi_core::players::normalize_permit_id;
use tournoi_core::search::{
    clamp_limit, clamp_offset, contains_pattern, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use tournoi_core::types::DbId;
use tournoi_db::models::entry::Entry;
use tournoi_db::models::entry_event::EntryEventType;
use tournoi_db::models::member::{
    CreateMember, CreateMemberRequest, Member, MemberEntrySummary, MemberFilter,
};
use tournoi_db::repositories::{EntryEventRepo, EntryRepo, MemberRepo};

use crate::engine::resolve_member;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::MemberListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A member with its confirmed entries and their rank in each band.
#[derive(Debug, Serialize)]
pub struct MemberWithEntries {
    #[serde(flatten)]
    pub member: Member,
    pub entries: Vec<MemberEntrySummary>,
}

/// Response body for `GET /members`.
#[derive(Debug, Serialize)]
pub struct MemberListResponse {
    pub members: Vec<MemberWithEntries>,
    pub is_admin: bool,
    pub total: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/members?limit=&offset=&search=&permit_id=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<MemberListParams>,
) -> AppResult<Json<MemberListResponse>> {
    let filter = MemberFilter {
        owner_id: auth.principal().owner_filter(),
        search_pattern: contains_pattern(params.search.as_deref()),
        permit_id: params
            .permit_id
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()),
    };
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let members = MemberRepo::list(&state.pool, &filter, auth.is_admin, limit, offset).await?;
    let total = MemberRepo::count(&state.pool, &filter, auth.is_admin).await?;

    let member_ids: Vec<DbId> = members.iter().map(|m| m.id).collect();
    let mut entries_by_member: HashMap<DbId, Vec<MemberEntrySummary>> = HashMap::new();
    for summary in MemberRepo::list_confirmed_entries(&state.pool, &member_ids).await? {
        entries_by_member
            .entry(summary.member_id)
            .or_default()
            .push(summary);
    }

    let members = members
        .into_iter()
        .map(|member| {
            let entries = entries_by_member.remove(&member.id).unwrap_or_default();
            MemberWithEntries { member, entries }
        })
        .collect();

    Ok(Json(MemberListResponse {
        members,
        is_admin: auth.is_admin,
        total,
    }))
}

/// GET /api/v1/members/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Member>>> {
    let mut conn = state.pool.acquire().await?;
    let member = resolve_member(&mut *conn, auth.principal(), id).await?;
    Ok(Json(DataResponse { data: member }))
}

/// POST /api/v1/members
///
/// Create a member owned by the caller's account. Only the permit id is
/// taken from the body; name, sex, points, category, club and permit type
/// come from the player registry. A permit already held by an active
/// member answers 409.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateMemberRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<Member>>)> {
    let Json(request) = payload?;
    let permit_id = normalize_permit_id(&request.permit_id)?;

    let player = state.registry.find_player(&permit_id).await?;
    let input = CreateMember::from(player);

    let member = MemberRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(member_id = member.id, user_id = auth.user_id, "Member created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// DELETE /api/v1/members/{id}
///
/// Soft-deletes the member and every active entry it holds, in one
/// transaction. Removed confirmed entries are logged as `deleted` events.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    let member = resolve_member(&mut *tx, auth.principal(), id).await?;

    let entries = EntryRepo::lock_active_for_member(&mut *tx, member.id).await?;
    let ids: Vec<DbId> = entries.iter().map(|e| e.id).collect();
    let removed = EntryRepo::soft_delete_many(&mut *tx, &ids, auth.user_id).await?;
    let removed_confirmed: Vec<Entry> = removed.into_iter().filter(|e| e.confirmed).collect();
    EntryEventRepo::record(
        &mut *tx,
        EntryEventType::Deleted,
        &removed_confirmed,
        auth.user_id,
    )
    .await?;

    MemberRepo::soft_delete(&mut *tx, member.id, auth.user_id).await?;
    tx.commit().await?;

    tracing::info!(
        member_id = member.id,
        entries_removed = ids.len(),
        actor_id = auth.user_id,
        "Member deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
