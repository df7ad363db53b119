#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

use tagradio::api::{app, AppState};
use tagradio::db;
use tagradio::models::{CreateStationRequest, CreateTrackRequest, Station, Tag, TaggedTrack};

pub const ADMIN_TOKEN: &str = "test-admin-token-0123456789";

/// Fresh in-memory SQLite pool with migrations applied. A single connection
/// keeps every query in the same in-memory database; foreign keys are
/// enforced so referential failures surface like they do in production.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("connect to in-memory sqlite");

    db::MIGRATOR.run(&pool).await.expect("run migrations");

    pool
}

/// Mirror of the router construction in `main`, so tests exercise the same
/// middleware stack production serves.
pub fn build_app(pool: SqlitePool) -> Router {
    app(Arc::new(AppState {
        db: pool,
        admin_token: ADMIN_TOKEN.to_string(),
    }))
}

pub async fn seed_tag(pool: &SqlitePool, name: &str) -> Tag {
    db::tags::insert(pool, name, "genre", 0).await.expect("insert tag")
}

pub async fn seed_track(pool: &SqlitePool, title: &str, active: bool, tags: &[Uuid]) -> TaggedTrack {
    db::tracks::insert(
        pool,
        CreateTrackRequest {
            title: title.to_string(),
            filename: format!("{title}.mp3"),
            duration_seconds: Some(180),
            file_size_bytes: None,
            active: Some(active),
            tag_ids: Some(tags.to_vec()),
        },
    )
    .await
    .expect("insert track")
}

pub async fn seed_station(pool: &SqlitePool, name: &str, slug: &str, active: bool) -> Station {
    db::stations::insert(
        pool,
        CreateStationRequest {
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            background_video: None,
            background_image: None,
            active: Some(active),
        },
    )
    .await
    .expect("insert station")
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
