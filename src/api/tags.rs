use crate::api::middleware::RequireAdmin;
use crate::api::AppState;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{CreateTagRequest, Tag, UpdateTagRequest};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub fn tag_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/:id", get(get_tag).patch(update_tag).delete(delete_tag))
}

async fn list_tags(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
) -> Result<Json<Vec<Tag>>> {
    let tags = db::tags::list(&state.db).await?;
    Ok(Json(tags))
}

async fn get_tag(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<Tag>> {
    let tag = db::tags::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;

    Ok(Json(tag))
}

async fn create_tag(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Json(req): Json<CreateTagRequest>,
) -> Result<Json<Tag>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = req.category.as_deref().unwrap_or("general");
    let tag = db::tags::insert(
        &state.db,
        &req.name,
        category,
        req.display_order.unwrap_or(0),
    )
    .await?;
    tracing::info!("Created tag '{}' ({})", tag.slug, tag.id);

    Ok(Json(tag))
}

async fn update_tag(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTagRequest>,
) -> Result<Json<Tag>> {
    if req.name.is_none() && req.category.is_none() && req.display_order.is_none() {
        return Err(AppError::Validation("No fields to update".to_string()));
    }

    let tag = db::tags::update(&state.db, id, req)
        .await?
        .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;

    Ok(Json(tag))
}

async fn delete_tag(
    State(state): State<Arc<AppState>>,
    _: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<()>> {
    if !db::tags::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Tag not found".to_string()));
    }

    Ok(Json(()))
}
