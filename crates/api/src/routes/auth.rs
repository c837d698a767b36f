//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /otp    -> request_otp
/// POST /login  -> login
/// POST /check  -> check (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/otp", post(auth::request_otp))
        .route("/login", post(auth::login))
        .route("/check", post(auth::check))
}
