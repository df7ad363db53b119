use crate::api::middleware::RequireAdmin;
use crate::api::AppState;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{
    CreateStationRequest, ReplaceRulesRequest, RuleKind, Station, StationRule,
    UpdateStationRequest,
};
use crate::slug;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub fn station_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stations", get(list_stations).post(create_station))
        .route(
            "/stations/:id",
            get(get_station).patch(update_station).delete(delete_station),
        )
        .route("/stations/:id/rules", get(get_rules).put(replace_rules))
}

/// Public directory entry: no activation flag or timestamps on the wire.
#[derive(Debug, Serialize)]
struct StationListing {
    id: Uuid,
    name: String,
    slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "backgroundVideo", skip_serializing_if = "Option::is_none")]
    background_video: Option<String>,
    #[serde(rename = "backgroundImage", skip_serializing_if = "Option::is_none")]
    background_image: Option<String>,
}

impl From<Station> for StationListing {
    fn from(station: Station) -> Self {
        StationListing {
            id: station.id,
            name: station.name,
            slug: station.slug,
            description: station.description,
            background_video: station.background_video,
            background_image: station.background_image,
        }
    }
}

/// Public station directory: active stations only, in summary shape.
async fn list_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationListing>>> {
    let stations = db::stations::list_active(&state.db).await?;
    Ok(Json(stations.into_iter().map(StationListing::from).collect()))
}

async fn get_station(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<Station>> {
    let station = db::stations::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Station not found".to_string()))?;

    Ok(Json(station))
}

async fn create_station(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Json(req): Json<CreateStationRequest>,
) -> Result<Json<Station>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !slug::is_valid(&req.slug) {
        return Err(AppError::Validation(
            "Slug may contain only lowercase letters, digits, and hyphens".to_string(),
        ));
    }

    let station = db::stations::insert(&state.db, req).await?;
    tracing::info!("Created station '{}' ({})", station.slug, station.id);

    Ok(Json(station))
}

async fn update_station(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStationRequest>,
) -> Result<Json<Station>> {
    if req.name.is_none()
        && req.description.is_none()
        && req.background_video.is_none()
        && req.background_image.is_none()
        && req.active.is_none()
    {
        return Err(AppError::Validation("No fields to update".to_string()));
    }

    let station = db::stations::update(&state.db, id, req)
        .await?
        .ok_or_else(|| AppError::NotFound("Station not found".to_string()))?;

    Ok(Json(station))
}

async fn delete_station(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<()>> {
    if !db::stations::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Station not found".to_string()));
    }

    Ok(Json(()))
}

async fn get_rules(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<StationRule>>> {
    db::stations::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Station not found".to_string()))?;

    let rules = db::rules::for_station(&state.db, id).await?;
    Ok(Json(rules))
}

/// Replace the station's whole rule set. `none` entries mean "no rule for
/// that tag" and are skipped rather than stored; an unknown kind never gets
/// this far (it fails JSON deserialization).
async fn replace_rules(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<ReplaceRulesRequest>,
) -> Result<Json<Vec<StationRule>>> {
    db::stations::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Station not found".to_string()))?;

    let rules: HashMap<Uuid, RuleKind> = req
        .tag_rules
        .into_iter()
        .filter_map(|(tag_id, entry)| entry.kind().map(|kind| (tag_id, kind)))
        .collect();

    db::rules::replace(&state.db, id, &rules).await?;
    tracing::info!("Replaced rule set for station {} ({} rules)", id, rules.len());

    let rules = db::rules::for_station(&state.db, id).await?;
    Ok(Json(rules))
}
