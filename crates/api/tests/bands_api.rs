//! Integration tests for the band catalog and its admin routes.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_band, create_user, get_auth, post_json_auth, token_for};
use serde_json::json;
use sqlx::PgPool;
use tournoi_core::bands::BandColor;

fn band_body(name: &str, day: i16) -> serde_json::Value {
    json!({
        "name": name,
        "day": day,
        "color": "blue",
        "sex": "ALL",
        "max_points": 1299.0,
        "max_entries": 72,
        "price": 9
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_bands_with_day_filter(pool: PgPool) {
    let user = create_user(&pool, "user@test.com", false).await;
    let a = create_band(&pool, "A", 1, BandColor::Pink, 8).await;
    let b = create_band(&pool, "B", 2, BandColor::Pink, 8).await;
    let c = create_band(&pool, "C", 1, BandColor::Blue, 8).await;
    let app = common::build_test_app(pool);
    let token = token_for(&user);

    let json = body_json(get_auth(app.clone(), "/api/v1/bands", &token).await).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&a.id) && ids.contains(&b.id) && ids.contains(&c.id));

    let json = body_json(get_auth(app.clone(), "/api/v1/bands?day=2", &token).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "B");
    assert_eq!(data[0]["color"], "pink");

    let response = get_auth(app, "/api/v1/bands?day=3", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_creates_and_reads_band(pool: PgPool) {
    let admin = create_user(&pool, "admin@test.com", true).await;
    let app = common::build_test_app(pool);
    let token = token_for(&admin);

    let response = post_json_auth(app.clone(), "/api/v1/admin/bands", band_body("E", 2), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "E");
    assert_eq!(json["data"]["max_entries"], 72);
    let id = json["data"]["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), &format!("/api/v1/admin/bands/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["price"], 9);

    let response = get_auth(app, "/api/v1/admin/bands/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_band_admin_routes_require_admin(pool: PgPool) {
    let user = create_user(&pool, "user@test.com", false).await;
    let band = create_band(&pool, "A", 1, BandColor::Pink, 8).await;
    let app = common::build_test_app(pool);
    let token = token_for(&user);

    let response = post_json_auth(app.clone(), "/api/v1/admin/bands", band_body("E", 2), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, &format!("/api/v1/admin/bands/{}", band.id), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_band_create_rejects_duplicates_and_bad_input(pool: PgPool) {
    let admin = create_user(&pool, "admin@test.com", true).await;
    create_band(&pool, "A", 1, BandColor::Pink, 8).await;
    let app = common::build_test_app(pool);
    let token = token_for(&admin);

    let response = post_json_auth(app.clone(), "/api/v1/admin/bands", band_body("A", 1), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json_auth(app.clone(), "/api/v1/admin/bands", band_body("F", 3), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let mut unknown_color = band_body("G", 1);
    unknown_color["color"] = json!("purple");
    let response = post_json_auth(app, "/api/v1/admin/bands", unknown_color, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
