pub mod admin;
pub mod auth;
pub mod bands;
pub mod health;
pub mod members;
pub mod players;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/otp                                   request a login code (public)
/// /auth/login                                 redeem a login code (public)
/// /auth/check                                 does the caller own an email
///
/// /bands                                      list, optional ?day=
///
/// /players                                    search the registry by name (public)
/// /players/{permit_id}                        registry lookup (public)
///
/// /members                                    list, create from the registry
/// /members/{id}                               get, delete
/// /members/{id}/band-availabilities           compute availability and hold
/// /members/{id}/set-entries                   confirm entries (POST)
/// /members/{id}/get-entries-history           entry history (admin only)
///
/// /admin/bands                                create (admin only)
/// /admin/bands/{id}                           get (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/bands", bands::router())
        .nest("/players", players::router())
        .nest("/members", members::router())
        .nest("/admin", admin::router())
}
