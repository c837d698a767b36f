//! Handlers for the `/auth` resource (one-time code login).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tournoi_core::error::CoreError;
use tournoi_core::otp::{generate_code, hash_code, is_well_formed};
use tournoi_core::types::DbId;
use tournoi_db::repositories::{OtpRepo, UserRepo};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notifications;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/otp` and `POST /auth/check`.
#[derive(Debug, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(email)]
    pub email: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub secret: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public account info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub is_admin: bool,
}

/// Response body for `POST /auth/otp`.
#[derive(Debug, Serialize)]
pub struct OtpResponse {
    /// `false` when a live code already existed and nothing was sent.
    pub sent: bool,
}

/// Response body for `POST /auth/check`.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub valid: bool,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/otp
///
/// Mail a fresh login code unless one is still live for the address.
pub async fn request_otp(
    State(state): State<AppState>,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> AppResult<Json<OtpResponse>> {
    let Json(input) = payload?;
    input.validate()?;
    let email = normalize_email(&input.email);
    let now = Utc::now();

    if OtpRepo::find_active(&state.pool, &email, now).await?.is_some() {
        tracing::debug!(email = %email, "Live login code exists, not sending another");
        return Ok(Json(OtpResponse { sent: false }));
    }

    let code = generate_code();
    OtpRepo::create(&state.pool, &email, &code.hash, now + state.config.otp_expiry()).await?;
    notifications::send_login_code(&state, &email, &code.plaintext).await?;

    Ok(Json(OtpResponse { sent: true }))
}

/// POST /api/v1/auth/login
///
/// Redeem a login code. The account is created on first login.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<AuthResponse>> {
    let Json(input) = payload?;
    input.validate()?;
    let email = normalize_email(&input.email);
    let secret = input.secret.trim();

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid or expired code".into()));
    if !is_well_formed(secret) {
        return Err(invalid());
    }

    OtpRepo::consume(&state.pool, &email, &hash_code(secret), Utc::now())
        .await?
        .ok_or_else(invalid)?;

    let user = UserRepo::find_or_create_by_email(&state.pool, &email).await?;

    let access_token = generate_access_token(user.id, user.is_admin, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, is_admin = user.is_admin, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user.id,
            email: user.email,
            is_admin: user.is_admin,
        },
    }))
}

/// POST /api/v1/auth/check
///
/// Whether the authenticated account owns the given address.
pub async fn check(
    State(state): State<AppState>,
    auth_user: AuthUser,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> AppResult<Json<CheckResponse>> {
    let Json(input) = payload?;
    let email = normalize_email(&input.email);

    let valid = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .is_some_and(|user| user.email == email);

    Ok(Json(CheckResponse { valid }))
}
