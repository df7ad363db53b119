use crate::api::middleware::RequireAdmin;
use crate::api::AppState;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{CreateTrackRequest, SetTrackTagsRequest, TaggedTrack, UpdateTrackRequest};
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub fn track_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tracks", get(list_tracks).post(create_track))
        .route(
            "/tracks/:id",
            get(get_track).patch(update_track).delete(delete_track),
        )
        .route("/tracks/:id/tags", put(set_track_tags))
}

/// Full library listing, inactive tracks included (admin view).
async fn list_tracks(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
) -> Result<Json<Vec<TaggedTrack>>> {
    let tracks = db::tracks::list_with_tags(&state.db).await?;
    Ok(Json(tracks))
}

async fn get_track(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<TaggedTrack>> {
    let track = db::tracks::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Track not found".to_string()))?;

    Ok(Json(track))
}

async fn create_track(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Json(req): Json<CreateTrackRequest>,
) -> Result<Json<TaggedTrack>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let track = db::tracks::insert(&state.db, req).await?;
    tracing::info!("Created track '{}' ({})", track.track.title, track.track.id);

    Ok(Json(track))
}

async fn update_track(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTrackRequest>,
) -> Result<Json<TaggedTrack>> {
    if req.title.is_none()
        && req.filename.is_none()
        && req.duration_seconds.is_none()
        && req.file_size_bytes.is_none()
        && req.active.is_none()
    {
        return Err(AppError::Validation("No fields to update".to_string()));
    }

    let track = db::tracks::update(&state.db, id, req)
        .await?
        .ok_or_else(|| AppError::NotFound("Track not found".to_string()))?;

    Ok(Json(track))
}

/// Full replace of a track's tag-membership set.
async fn set_track_tags(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<SetTrackTagsRequest>,
) -> Result<Json<TaggedTrack>> {
    if !db::tracks::set_tags(&state.db, id, &req.tag_ids).await? {
        return Err(AppError::NotFound("Track not found".to_string()));
    }

    let track = db::tracks::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Track not found".to_string()))?;

    Ok(Json(track))
}

async fn delete_track(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<()>> {
    if !db::tracks::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Track not found".to_string()));
    }

    Ok(Json(()))
}
