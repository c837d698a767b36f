//! Route definitions for the `/members` resource, including the
//! reservation endpoints nested under `/members/{id}`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{entries, members};
use crate::state::AppState;

/// Routes mounted at `/members`.
///
/// ```text
/// GET    /                               -> list
/// POST   /                               -> create
/// GET    /{id}                           -> get_by_id
/// DELETE /{id}                           -> delete
/// GET    /{id}/band-availabilities       -> band_availabilities
/// POST   /{id}/set-entries               -> set_entries
/// GET    /{id}/get-entries-history       -> entries_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(members::list).post(members::create))
        .route("/{id}", get(members::get_by_id).delete(members::delete))
        .route(
            "/{id}/band-availabilities",
            get(entries::band_availabilities),
        )
        .route("/{id}/set-entries", post(entries::set_entries))
        .route(
            "/{id}/get-entries-history",
            get(entries::entries_history),
        )
}
