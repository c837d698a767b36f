//! Integration tests for the `/members` resource.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use common::{
    active_entries, assert_conflict, body_json, build_test_app_with_registry, create_band,
    create_member, create_user, delete_auth, get_auth, player, post_json, post_json_auth,
    token_for, FakeRegistry,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tournoi_core::bands::{BandColor, Sex};
use tournoi_core::types::DbId;
use tournoi_db::repositories::MemberRepo;

/// Hold then confirm `band_ids` for a member over HTTP.
async fn enter(app: &Router, member_id: DbId, band_ids: &[DbId], token: &str) {
    let uri = format!("/api/v1/members/{member_id}/band-availabilities");
    let report = body_json(get_auth(app.clone(), &uri, token).await).await;
    let uri = format!("/api/v1/members/{member_id}/set-entries");
    let body = json!({ "bandIds": band_ids, "sessionId": report["session_id"] });
    let response = post_json_auth(app.clone(), &uri, body, token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

fn member_ids(json: &Value) -> Vec<i64> {
    json["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Attributes come from the registry; anything else in the body is ignored.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_member_from_registry(pool: PgPool) {
    let owner = create_user(&pool, "owner@test.com", false).await;
    let mut marie = player("7512345", "Curie", Sex::Female, 1234.5);
    marie.first_name = "Marie".to_string();
    marie.club_name = Some("TT Paris 13".to_string());
    let registry = Arc::new(FakeRegistry::with_players(vec![marie]));
    let app = build_test_app_with_registry(pool, registry);

    let body = json!({ "permit_id": " 7512345 ", "sex": "M", "points": 0 });
    let response = post_json_auth(app, "/api/v1/members", body, &token_for(&owner)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["permit_id"], "7512345");
    assert_eq!(data["user_id"], owner.id);
    assert_eq!(data["first_name"], "Marie");
    assert_eq!(data["last_name"], "Curie");
    assert_eq!(data["sex"], "F");
    assert_eq!(data["points"], 1234.5);
    assert_eq!(data["category"], "S");
    assert_eq!(data["club_name"], "TT Paris 13");
    assert_eq!(data["permit_type"], "T");
    assert!(data["notified_at"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_unknown_permit_is_404(pool: PgPool) {
    let owner = create_user(&pool, "owner@test.com", false).await;
    let app = common::build_test_app(pool.clone());

    let body = json!({ "permit_id": "9999999" });
    let response = post_json_auth(app, "/api/v1/members", body, &token_for(&owner)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].as_str().unwrap().contains("9999999"));
    assert_eq!(MemberRepo::count(&pool, &Default::default(), true).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_registry_down_is_502(pool: PgPool) {
    let owner = create_user(&pool, "owner@test.com", false).await;
    let app = build_test_app_with_registry(pool.clone(), Arc::new(FakeRegistry::unavailable()));

    let body = json!({ "permit_id": "7512345" });
    let response = post_json_auth(app, "/api/v1/members", body, &token_for(&owner)).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "REGISTRY_UNAVAILABLE");
    assert_eq!(MemberRepo::count(&pool, &Default::default(), true).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_duplicate_permit_is_409(pool: PgPool) {
    let owner = create_user(&pool, "owner@test.com", false).await;
    create_member(&pool, &owner, "1001", Sex::Male, 500.0).await;
    let registry = Arc::new(FakeRegistry::with_players(vec![player(
        "1001",
        "Martin",
        Sex::Male,
        500.0,
    )]));
    let app = build_test_app_with_registry(pool, registry);

    let body = json!({ "permit_id": "1001" });
    let response = post_json_auth(app, "/api/v1/members", body, &token_for(&owner)).await;

    assert_conflict(response, "CONFLICT").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_invalid_permit_is_400(pool: PgPool) {
    let owner = create_user(&pool, "owner@test.com", false).await;
    let registry = Arc::new(FakeRegistry::with_players(vec![player(
        "7",
        "Court",
        Sex::Male,
        500.0,
    )]));
    let app = build_test_app_with_registry(pool, registry);
    let token = token_for(&owner);

    for permit_id in ["   ", "7", "75/12"] {
        let body = json!({ "permit_id": permit_id });
        let response = post_json_auth(app.clone(), "/api/v1/members", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "permit {permit_id:?}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let response = post_json_auth(app, "/api/v1/members", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/members", json!({ "permit_id": "7512345" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// Accounts see their own members; admins see everyone.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_scoped_to_owner(pool: PgPool) {
    let alice = create_user(&pool, "alice@test.com", false).await;
    let bob = create_user(&pool, "bob@test.com", false).await;
    let admin = create_user(&pool, "admin@test.com", true).await;
    let a1 = create_member(&pool, &alice, "1001", Sex::Male, 500.0).await;
    let a2 = create_member(&pool, &alice, "1002", Sex::Female, 500.0).await;
    let b1 = create_member(&pool, &bob, "2001", Sex::Male, 500.0).await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app.clone(), "/api/v1/members", &token_for(&alice)).await).await;
    assert_eq!(member_ids(&json), vec![a2.id, a1.id]);
    assert_eq!(json["total"], 2);
    assert_eq!(json["is_admin"], false);

    let json = body_json(get_auth(app, "/api/v1/members", &token_for(&admin)).await).await;
    assert_eq!(member_ids(&json), vec![b1.id, a2.id, a1.id]);
    assert_eq!(json["total"], 3);
    assert_eq!(json["is_admin"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_pagination_search_and_permit_filter(pool: PgPool) {
    let alice = create_user(&pool, "alice@test.com", false).await;
    let bob = create_user(&pool, "bob@test.com", false).await;
    let admin = create_user(&pool, "admin@test.com", true).await;
    let a1 = create_member(&pool, &alice, "1001", Sex::Male, 500.0).await;
    let a2 = create_member(&pool, &alice, "1002", Sex::Male, 500.0).await;
    let b1 = create_member(&pool, &bob, "2001", Sex::Male, 500.0).await;
    let app = common::build_test_app(pool);
    let admin_token = token_for(&admin);

    let json =
        body_json(get_auth(app.clone(), "/api/v1/members?limit=1&offset=1", &admin_token).await)
            .await;
    assert_eq!(member_ids(&json), vec![a2.id]);
    assert_eq!(json["total"], 3);

    let json = body_json(get_auth(app.clone(), "/api/v1/members?search=bob", &admin_token).await)
        .await;
    assert_eq!(member_ids(&json), vec![b1.id]);

    let json =
        body_json(get_auth(app.clone(), "/api/v1/members?permit_id=1001", &admin_token).await)
            .await;
    assert_eq!(member_ids(&json), vec![a1.id]);

    // Owner email is only searchable by admins.
    let json = body_json(
        get_auth(app, "/api/v1/members?search=alice", &token_for(&alice)).await,
    )
    .await;
    assert!(member_ids(&json).is_empty());
}

/// Each listed member carries its confirmed entries with its rank.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_includes_entry_ranks(pool: PgPool) {
    let owner = create_user(&pool, "owner@test.com", false).await;
    let first = create_member(&pool, &owner, "1001", Sex::Male, 500.0).await;
    let second = create_member(&pool, &owner, "1002", Sex::Male, 500.0).await;
    let band = create_band(&pool, "V", 1, BandColor::Pink, 1).await;
    let app = common::build_test_app(pool);
    let token = token_for(&owner);

    enter(&app, first.id, &[band.id], &token).await;
    enter(&app, second.id, &[band.id], &token).await;

    let json = body_json(get_auth(app, "/api/v1/members", &token).await).await;
    let members = json["members"].as_array().unwrap();
    let rank_of = |member_id: DbId| {
        let member = members.iter().find(|m| m["id"] == member_id).unwrap();
        let entries = member["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["band_name"], "V");
        assert_eq!(entries[0]["band_price"], 8);
        entries[0]["band_rank"].as_i64().unwrap()
    };
    assert_eq!(rank_of(first.id), 1);
    assert_eq!(rank_of(second.id), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_member_respects_ownership(pool: PgPool) {
    let owner = create_user(&pool, "owner@test.com", false).await;
    let stranger = create_user(&pool, "stranger@test.com", false).await;
    let admin = create_user(&pool, "admin@test.com", true).await;
    let member = create_member(&pool, &owner, "1001", Sex::Male, 500.0).await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/members/{}", member.id);

    let response = get_auth(app.clone(), &uri, &token_for(&owner)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["permit_id"], "1001");

    let response = get_auth(app.clone(), &uri, &token_for(&stranger)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app.clone(), &uri, &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, "/api/v1/members/999999", &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// Deleting a member removes its entries and frees its permit.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_member_cascades_entries(pool: PgPool) {
    let owner = create_user(&pool, "owner@test.com", false).await;
    let admin = create_user(&pool, "admin@test.com", true).await;
    let member = create_member(&pool, &owner, "1001", Sex::Male, 500.0).await;
    let band = create_band(&pool, "V", 1, BandColor::Pink, 4).await;
    let app = common::build_test_app(pool.clone());
    let token = token_for(&owner);

    enter(&app, member.id, &[band.id], &token).await;

    let uri = format!("/api/v1/members/{}", member.id);
    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert!(active_entries(&pool, member.id).await.is_empty());
    assert!(MemberRepo::find_by_id(&pool, member.id).await.unwrap().is_none());

    let history_uri = format!("/api/v1/members/{}/get-entries-history", member.id);
    let json = body_json(get_auth(app, &history_uri, &token_for(&admin)).await).await;
    let events: Vec<&str> = json["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["eventType"].as_str().unwrap())
        .collect();
    assert_eq!(events, vec!["created", "deleted"]);

    create_member(&pool, &owner, "1001", Sex::Male, 500.0).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_foreign_member_is_404(pool: PgPool) {
    let owner = create_user(&pool, "owner@test.com", false).await;
    let stranger = create_user(&pool, "stranger@test.com", false).await;
    let member = create_member(&pool, &owner, "1001", Sex::Male, 500.0).await;
    let app = common::build_test_app(pool.clone());

    let uri = format!("/api/v1/members/{}", member.id);
    let response = delete_auth(app, &uri, &token_for(&stranger)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(MemberRepo::find_by_id(&pool, member.id).await.unwrap().is_some());
}
