use crate::db::parse_uuid;
use crate::error::{AppError, Result};
use crate::models::{CreateStationRequest, Station, UpdateStationRequest};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

fn map_station(row: &SqliteRow) -> Result<Station> {
    Ok(Station {
        id: parse_uuid(row.get("id"), "stations.id")?,
        name: row.get("name"),
        slug: row.get("slug"),
        description: row.get("description"),
        background_video: row.get("background_video"),
        background_image: row.get("background_image"),
        active: row.get("active"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Stations visible to unauthenticated clients.
pub async fn list_active(pool: &SqlitePool) -> Result<Vec<Station>> {
    let rows = sqlx::query("SELECT * FROM stations WHERE active = 1 ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    rows.iter().map(map_station).collect()
}

pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Option<Station>> {
    let row = sqlx::query("SELECT * FROM stations WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(map_station).transpose()
}

pub async fn get_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Station>> {
    let row = sqlx::query("SELECT * FROM stations WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(map_station).transpose()
}

/// Insert a new station. The slug is taken as given (grammar is validated at
/// the API boundary); a collision is rejected, never silently renamed.
pub async fn insert(pool: &SqlitePool, req: CreateStationRequest) -> Result<Station> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM stations WHERE slug = ?)")
        .bind(&req.slug)
        .fetch_one(pool)
        .await?;

    if exists {
        return Err(AppError::Validation("Station slug already exists".to_string()));
    }

    let station = Station {
        id: Uuid::new_v4(),
        name: req.name,
        slug: req.slug,
        description: req.description,
        background_video: req.background_video,
        background_image: req.background_image,
        active: req.active.unwrap_or(true),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO stations
            (id, name, slug, description, background_video, background_image, active,
             created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(station.id.to_string())
    .bind(&station.name)
    .bind(&station.slug)
    .bind(&station.description)
    .bind(&station.background_video)
    .bind(&station.background_image)
    .bind(station.active)
    .bind(station.created_at)
    .bind(station.updated_at)
    .execute(pool)
    .await?;

    Ok(station)
}

/// Apply a partial update. The slug is fixed at creation time and never
/// renamed here; players bookmark it.
pub async fn update(
    pool: &SqlitePool,
    id: Uuid,
    req: UpdateStationRequest,
) -> Result<Option<Station>> {
    let Some(mut station) = get(pool, id).await? else {
        return Ok(None);
    };

    if let Some(name) = req.name {
        station.name = name;
    }
    if let Some(description) = req.description {
        station.description = Some(description);
    }
    if let Some(background_video) = req.background_video {
        station.background_video = Some(background_video);
    }
    if let Some(background_image) = req.background_image {
        station.background_image = Some(background_image);
    }
    if let Some(active) = req.active {
        station.active = active;
    }
    station.updated_at = Utc::now();

    sqlx::query(
        r#"
        UPDATE stations
        SET name = ?, description = ?, background_video = ?, background_image = ?,
            active = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&station.name)
    .bind(&station.description)
    .bind(&station.background_video)
    .bind(&station.background_image)
    .bind(station.active)
    .bind(station.updated_at)
    .bind(station.id.to_string())
    .execute(pool)
    .await?;

    Ok(Some(station))
}

pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM stations WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
