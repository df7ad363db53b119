//! The public player surface: fetch a station's playlist by slug and report
//! track plays. A fetch is stateless - the server keeps no playhead or
//! session; the player sequences playback and re-fetches on reload.

use crate::api::AppState;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{Station, TaggedTrack};
use crate::resolver;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

pub fn playback_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/play/:slug", get(station_playlist))
        .route("/tracks/:id/played", post(track_played))
}

#[derive(Debug, Serialize)]
struct StationSummary {
    id: Uuid,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "backgroundVideo", skip_serializing_if = "Option::is_none")]
    background_video: Option<String>,
    #[serde(rename = "backgroundImage", skip_serializing_if = "Option::is_none")]
    background_image: Option<String>,
}

impl From<Station> for StationSummary {
    fn from(station: Station) -> Self {
        StationSummary {
            id: station.id,
            name: station.name,
            description: station.description,
            background_video: station.background_video,
            background_image: station.background_image,
        }
    }
}

#[derive(Debug, Serialize)]
struct Song {
    id: Uuid,
    title: String,
    filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<i64>,
}

impl From<TaggedTrack> for Song {
    fn from(tagged: TaggedTrack) -> Self {
        Song {
            id: tagged.track.id,
            title: tagged.track.title,
            filename: tagged.track.filename,
            duration: tagged.track.duration_seconds,
        }
    }
}

#[derive(Debug, Serialize)]
struct PlaylistResponse {
    station: StationSummary,
    songs: Vec<Song>,
    total_songs: usize,
}

/// Resolve a station's playlist: load its rule set and the active library,
/// run the resolver, shape the shuffled result for the player. Zero matches
/// is a success with an empty `songs` array, not an error.
async fn station_playlist(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<PlaylistResponse>> {
    let station = db::stations::get_by_slug(&state.db, &slug)
        .await?
        .filter(|s| s.active)
        .ok_or_else(|| AppError::NotFound("Station not found".to_string()))?;

    let rules = db::rules::for_station(&state.db, station.id).await?;
    let tracks = db::tracks::active_with_tags(&state.db).await?;

    let matched = resolver::resolve(tracks, &rules);
    tracing::debug!(
        "Station '{}' resolved {} rules into {} songs",
        station.slug,
        rules.len(),
        matched.len()
    );

    let songs: Vec<Song> = matched.into_iter().map(Song::from).collect();
    let total_songs = songs.len();

    Ok(Json(PlaylistResponse {
        station: station.into(),
        songs,
        total_songs,
    }))
}

async fn track_played(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<()>> {
    let found = db::tracks::increment_play_count(&state.db, id).await?;
    if !found {
        return Err(AppError::NotFound("Track not found".to_string()));
    }

    Ok(Json(()))
}
