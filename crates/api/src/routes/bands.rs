//! Route definitions for the `/bands` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::bands;
use crate::state::AppState;

/// Routes mounted at `/bands`.
///
/// ```text
/// GET /  -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(bands::list))
}
