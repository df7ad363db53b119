pub mod middleware;
pub mod playback;
pub mod stations;
pub mod tags;
pub mod tracks;

use axum::{
    http::{header, Method},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub struct AppState {
    pub db: SqlitePool,
    pub admin_token: String,
}

/// All `/api/v1` routes.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(playback::playback_routes())
        .merge(stations::station_routes())
        .merge(tags::tag_routes())
        .merge(tracks::track_routes())
}

/// The complete application: API routes plus middleware. Built here so the
/// integration tests exercise the same stack `main` serves.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
        )
}
