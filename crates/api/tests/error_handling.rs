//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use tournoi_api::error::AppError;
use tournoi_api::registry::RegistryError;
use tournoi_core::bands::BandColor;
use tournoi_core::entry_limits::EntryLimitViolation;
use tournoi_core::error::CoreError;
use validator::Validate;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Member",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Member with id 42 not found");
}

#[tokio::test]
async fn not_found_many_lists_every_id() {
    let err = AppError::Core(CoreError::NotFoundMany {
        entity: "Band",
        ids: vec![3, 7],
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Band not found for ids: 3, 7");
}

#[tokio::test]
async fn session_expired_returns_409() {
    let (status, json) = error_to_response(AppError::Core(CoreError::SessionExpired)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "SESSION_EXPIRED");
    assert_eq!(json["error"], "missing lock for entry");
}

#[tokio::test]
async fn entry_limits_carry_their_own_codes() {
    let per_day = CoreError::from(EntryLimitViolation::BandsPerDay { day: 1 });
    let (status, json) = error_to_response(AppError::Core(per_day)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "BAND_LIMIT_PER_DAY");

    let per_color = CoreError::from(EntryLimitViolation::ColorPerDay {
        day: 2,
        color: BandColor::Pink,
    });
    let (status, json) = error_to_response(AppError::Core(per_color)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "BAND_COLOR_PER_DAY");
    assert_eq!(json["error"], "limit of one band per color per day reached");
}

#[tokio::test]
async fn core_validation_returns_400() {
    let err = AppError::Core(CoreError::Validation("day must be between 1 and 2, got 3".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn field_validation_returns_400() {
    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1))]
        name: String,
    }
    let errors = Named {
        name: String::new(),
    }
    .validate()
    .unwrap_err();

    let (status, json) = error_to_response(AppError::Validation(errors)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn auth_errors_map_to_401_and_403() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no token".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Forbidden("admins only".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn unknown_registry_player_returns_404() {
    let err = AppError::Registry(RegistryError::NotFound("7512345".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Player 7512345 not found in the registry");
}

#[tokio::test]
async fn registry_failures_return_502_without_details() {
    for err in [
        RegistryError::HttpStatus(500),
        RegistryError::Decode("expected value at line 1".into()),
    ] {
        let (status, json) = error_to_response(AppError::Registry(err)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["code"], "REGISTRY_UNAVAILABLE");
        assert_eq!(json["error"], "The player registry is unavailable");
    }
}

#[tokio::test]
async fn internal_errors_hide_details() {
    let (status, json) =
        error_to_response(AppError::InternalError("smtp password rejected".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");

    let (status, _) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
