use crate::db::parse_uuid;
use crate::error::Result;
use crate::models::{CreateTrackRequest, TaggedTrack, Track, UpdateTrackRequest};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

fn map_track(row: &SqliteRow) -> Result<Track> {
    Ok(Track {
        id: parse_uuid(row.get("id"), "tracks.id")?,
        title: row.get("title"),
        filename: row.get("filename"),
        duration_seconds: row.get("duration_seconds"),
        file_size_bytes: row.get("file_size_bytes"),
        active: row.get("active"),
        play_count: row.get("play_count"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

async fn fetch_with_tags(pool: &SqlitePool, active_only: bool) -> Result<Vec<TaggedTrack>> {
    let track_query = if active_only {
        "SELECT * FROM tracks WHERE active = 1 ORDER BY title"
    } else {
        "SELECT * FROM tracks ORDER BY title"
    };
    let rows = sqlx::query(track_query).fetch_all(pool).await?;
    let tracks: Vec<Track> = rows.iter().map(map_track).collect::<Result<_>>()?;

    let membership_query = if active_only {
        r#"
        SELECT tt.track_id, tt.tag_id
        FROM track_tags tt
        JOIN tracks t ON t.id = tt.track_id
        WHERE t.active = 1
        "#
    } else {
        "SELECT track_id, tag_id FROM track_tags"
    };
    let rows = sqlx::query(membership_query).fetch_all(pool).await?;

    let mut memberships: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
    for row in &rows {
        let track_id = parse_uuid(row.get("track_id"), "track_tags.track_id")?;
        let tag_id = parse_uuid(row.get("tag_id"), "track_tags.tag_id")?;
        memberships.entry(track_id).or_default().insert(tag_id);
    }

    Ok(tracks
        .into_iter()
        .map(|track| {
            let tag_ids = memberships.remove(&track.id).unwrap_or_default();
            TaggedTrack { track, tag_ids }
        })
        .collect())
}

/// All active tracks with their tag sets - the resolver's input. Inactive
/// tracks are filtered here so the resolver never reasons about activation.
pub async fn active_with_tags(pool: &SqlitePool) -> Result<Vec<TaggedTrack>> {
    fetch_with_tags(pool, true).await
}

/// Full library listing for admin views, inactive tracks included.
pub async fn list_with_tags(pool: &SqlitePool) -> Result<Vec<TaggedTrack>> {
    fetch_with_tags(pool, false).await
}

pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Option<TaggedTrack>> {
    let row = sqlx::query("SELECT * FROM tracks WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let track = map_track(&row)?;

    let rows = sqlx::query("SELECT tag_id FROM track_tags WHERE track_id = ?")
        .bind(id.to_string())
        .fetch_all(pool)
        .await?;

    let mut tag_ids = HashSet::new();
    for row in &rows {
        tag_ids.insert(parse_uuid(row.get("tag_id"), "track_tags.tag_id")?);
    }

    Ok(Some(TaggedTrack { track, tag_ids }))
}

pub async fn insert(pool: &SqlitePool, req: CreateTrackRequest) -> Result<TaggedTrack> {
    let track = Track {
        id: Uuid::new_v4(),
        title: req.title,
        filename: req.filename,
        duration_seconds: req.duration_seconds,
        file_size_bytes: req.file_size_bytes,
        active: req.active.unwrap_or(true),
        play_count: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let tag_ids: HashSet<Uuid> = req.tag_ids.unwrap_or_default().into_iter().collect();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO tracks
            (id, title, filename, duration_seconds, file_size_bytes, active, play_count,
             created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(track.id.to_string())
    .bind(&track.title)
    .bind(&track.filename)
    .bind(track.duration_seconds)
    .bind(track.file_size_bytes)
    .bind(track.active)
    .bind(track.play_count)
    .bind(track.created_at)
    .bind(track.updated_at)
    .execute(&mut *tx)
    .await?;

    for tag_id in &tag_ids {
        sqlx::query("INSERT INTO track_tags (track_id, tag_id) VALUES (?, ?)")
            .bind(track.id.to_string())
            .bind(tag_id.to_string())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(TaggedTrack { track, tag_ids })
}

pub async fn update(
    pool: &SqlitePool,
    id: Uuid,
    req: UpdateTrackRequest,
) -> Result<Option<TaggedTrack>> {
    let Some(mut tagged) = get(pool, id).await? else {
        return Ok(None);
    };
    let track = &mut tagged.track;

    if let Some(title) = req.title {
        track.title = title;
    }
    if let Some(filename) = req.filename {
        track.filename = filename;
    }
    if let Some(duration_seconds) = req.duration_seconds {
        track.duration_seconds = Some(duration_seconds);
    }
    if let Some(file_size_bytes) = req.file_size_bytes {
        track.file_size_bytes = Some(file_size_bytes);
    }
    if let Some(active) = req.active {
        track.active = active;
    }
    track.updated_at = Utc::now();

    sqlx::query(
        r#"
        UPDATE tracks
        SET title = ?, filename = ?, duration_seconds = ?, file_size_bytes = ?,
            active = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&track.title)
    .bind(&track.filename)
    .bind(track.duration_seconds)
    .bind(track.file_size_bytes)
    .bind(track.active)
    .bind(track.updated_at)
    .bind(track.id.to_string())
    .execute(pool)
    .await?;

    Ok(Some(tagged))
}

/// Replace a track's tag set in full. Delete-then-insert inside one
/// transaction, same shape as a station rule replacement.
pub async fn set_tags(pool: &SqlitePool, id: Uuid, tag_ids: &[Uuid]) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tracks WHERE id = ?)")
        .bind(id.to_string())
        .fetch_one(pool)
        .await?;
    if !exists {
        return Ok(false);
    }

    let unique: HashSet<Uuid> = tag_ids.iter().copied().collect();

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM track_tags WHERE track_id = ?")
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

    for tag_id in &unique {
        sqlx::query("INSERT INTO track_tags (track_id, tag_id) VALUES (?, ?)")
            .bind(id.to_string())
            .bind(tag_id.to_string())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(true)
}

pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn increment_play_count(pool: &SqlitePool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("UPDATE tracks SET play_count = play_count + 1 WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
