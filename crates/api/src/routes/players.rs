//! Route definitions for the `/players` registry lookups.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::players;
use crate::state::AppState;

/// Routes mounted at `/players`. No authentication.
///
/// ```text
/// POST /              -> search
/// GET  /{permit_id}   -> get_by_permit_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(players::search))
        .route("/{permit_id}", get(players::get_by_permit_id))
}
