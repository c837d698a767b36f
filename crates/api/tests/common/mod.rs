#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use tournoi_api::auth::jwt::{generate_access_token, JwtConfig};
use tournoi_api::config::ServerConfig;
use tournoi_api::registry::{Player, PlayerRegistry, RegistryError};
use tournoi_api::router::build_app_router;
use tournoi_api::state::AppState;
use tournoi_core::bands::{BandColor, BandSex, Sex};
use tournoi_db::models::band::{Band, CreateBand};
use tournoi_db::models::entry::Entry;
use tournoi_db::models::member::{CreateMember, Member};
use tournoi_db::models::user::{CreateUser, User};
use tournoi_db::repositories::{BandRepo, MemberRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults and no SMTP.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        entry_hold_mins: 10,
        otp_expiry_mins: 10,
        external_url: "http://localhost:5173".to_string(),
        registry_url: "http://registry.invalid/v1".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        email: None,
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given database pool and an empty player registry.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_registry(pool, Arc::new(FakeRegistry::default()))
}

/// Same as [`build_test_app`] with a chosen registry.
pub fn build_test_app_with_registry(pool: PgPool, registry: Arc<FakeRegistry>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: None,
        registry,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Player registry
// ---------------------------------------------------------------------------

/// In-memory registry answering from a fixed player list.
#[derive(Default)]
pub struct FakeRegistry {
    players: Vec<Player>,
    unavailable: bool,
    searches: Mutex<Vec<(String, String)>>,
}

impl FakeRegistry {
    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            players,
            ..Default::default()
        }
    }

    /// A registry whose every call fails as an upstream outage would.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    /// The `(last_name, first_name)` pairs searched so far.
    pub fn searches(&self) -> Vec<(String, String)> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlayerRegistry for FakeRegistry {
    async fn find_player(&self, permit_id: &str) -> Result<Player, RegistryError> {
        if self.unavailable {
            return Err(RegistryError::HttpStatus(503));
        }
        self.players
            .iter()
            .find(|p| p.permit_id == permit_id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(permit_id.to_string()))
    }

    async fn search_players(
        &self,
        last_name: &str,
        first_name: &str,
    ) -> Result<Vec<Player>, RegistryError> {
        self.searches
            .lock()
            .unwrap()
            .push((last_name.to_string(), first_name.to_string()));
        if self.unavailable {
            return Err(RegistryError::HttpStatus(503));
        }
        let last = last_name.to_lowercase();
        let first = first_name.to_lowercase();
        Ok(self
            .players
            .iter()
            .filter(|p| p.last_name.to_lowercase().starts_with(&last))
            .filter(|p| p.first_name.to_lowercase().starts_with(&first))
            .cloned()
            .collect())
    }
}

/// A registry player with a club.
pub fn player(permit_id: &str, last_name: &str, sex: Sex, points: f64) -> Player {
    Player {
        permit_id: permit_id.to_string(),
        first_name: "Jean".to_string(),
        last_name: last_name.to_string(),
        sex,
        points,
        category: Some("S".to_string()),
        club_name: Some("TT Club".to_string()),
        permit_type: Some("T".to_string()),
    }
}

/// Sign an access token the test app accepts.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, user.is_admin, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Assert a 409 with the given error code.
pub async fn assert_conflict(response: Response, code: &str) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected body: {json}");
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A member's non-deleted entries, ordered by id.
pub async fn active_entries(pool: &PgPool, member_id: i64) -> Vec<Entry> {
    sqlx::query_as::<_, Entry>(
        "SELECT * FROM entries WHERE member_id = $1 AND deleted_at IS NULL ORDER BY id",
    )
    .bind(member_id)
    .fetch_all(pool)
    .await
    .unwrap()
}

/// Every entry a member ever had, soft-deleted ones included, ordered by id.
pub async fn all_entries(pool: &PgPool, member_id: i64) -> Vec<Entry> {
    sqlx::query_as::<_, Entry>("SELECT * FROM entries WHERE member_id = $1 ORDER BY id")
        .bind(member_id)
        .fetch_all(pool)
        .await
        .unwrap()
}

pub async fn create_user(pool: &PgPool, email: &str, is_admin: bool) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            is_admin,
        },
    )
    .await
    .expect("user creation should succeed")
}

pub async fn create_member(
    pool: &PgPool,
    owner: &User,
    permit_id: &str,
    sex: Sex,
    points: f64,
) -> Member {
    let input = CreateMember {
        permit_id: permit_id.to_string(),
        first_name: "Jean".to_string(),
        last_name: format!("Joueur {permit_id}"),
        sex,
        points,
        category: None,
        club_name: Some("TT Club".to_string()),
        permit_type: None,
    };
    MemberRepo::create(pool, owner.id, &input)
        .await
        .expect("member creation should succeed")
}

pub async fn create_band(
    pool: &PgPool,
    name: &str,
    day: i16,
    color: BandColor,
    max_entries: i32,
) -> Band {
    create_band_for(pool, name, day, color, BandSex::All, 4000.0, max_entries).await
}

pub async fn create_band_for(
    pool: &PgPool,
    name: &str,
    day: i16,
    color: BandColor,
    sex: BandSex,
    max_points: f64,
    max_entries: i32,
) -> Band {
    let input = CreateBand {
        name: name.to_string(),
        day,
        color,
        sex,
        max_points,
        max_entries,
        price: 8,
    };
    BandRepo::create(pool, &input)
        .await
        .expect("band creation should succeed")
}
