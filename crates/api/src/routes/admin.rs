//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bands;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires an admin account.
///
/// ```text
/// POST /bands       -> bands::create
/// GET  /bands/{id}  -> bands::get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bands", post(bands::create))
        .route("/bands/{id}", get(bands::get_by_id))
}
