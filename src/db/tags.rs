use crate::db::parse_uuid;
use crate::error::{AppError, Result};
use crate::models::{Tag, UpdateTagRequest};
use crate::slug::slugify;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

fn map_tag(row: &SqliteRow) -> Result<Tag> {
    Ok(Tag {
        id: parse_uuid(row.get("id"), "tags.id")?,
        name: row.get("name"),
        category: row.get("category"),
        slug: row.get("slug"),
        display_order: row.get("display_order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Tag>> {
    let rows = sqlx::query("SELECT * FROM tags ORDER BY display_order, name")
        .fetch_all(pool)
        .await?;

    rows.iter().map(map_tag).collect()
}

pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Option<Tag>> {
    let row = sqlx::query("SELECT * FROM tags WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(map_tag).transpose()
}

pub async fn insert(
    pool: &SqlitePool,
    name: &str,
    category: &str,
    display_order: i64,
) -> Result<Tag> {
    let tag = Tag {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: category.to_string(),
        slug: slugify(name),
        display_order,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO tags (id, name, category, slug, display_order, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(tag.id.to_string())
    .bind(&tag.name)
    .bind(&tag.category)
    .bind(&tag.slug)
    .bind(tag.display_order)
    .bind(tag.created_at)
    .bind(tag.updated_at)
    .execute(pool)
    .await?;

    Ok(tag)
}

/// Apply a partial update. A renamed tag gets its slug regenerated from the
/// new name.
pub async fn update(pool: &SqlitePool, id: Uuid, req: UpdateTagRequest) -> Result<Option<Tag>> {
    let Some(mut tag) = get(pool, id).await? else {
        return Ok(None);
    };

    if let Some(name) = req.name {
        tag.slug = slugify(&name);
        tag.name = name;
    }
    if let Some(category) = req.category {
        tag.category = category;
    }
    if let Some(display_order) = req.display_order {
        tag.display_order = display_order;
    }
    tag.updated_at = Utc::now();

    sqlx::query(
        r#"
        UPDATE tags
        SET name = ?, category = ?, slug = ?, display_order = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&tag.name)
    .bind(&tag.category)
    .bind(&tag.slug)
    .bind(tag.display_order)
    .bind(tag.updated_at)
    .bind(tag.id.to_string())
    .execute(pool)
    .await?;

    Ok(Some(tag))
}

/// Delete a tag. Refused while any track still references it; station rules
/// over the tag are pruned by the schema's cascade.
pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<bool> {
    let referenced: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM track_tags WHERE tag_id = ?")
        .bind(id.to_string())
        .fetch_one(pool)
        .await?;

    if referenced > 0 {
        return Err(AppError::Validation(format!(
            "Tag is still referenced by {referenced} track(s)"
        )));
    }

    let result = sqlx::query("DELETE FROM tags WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
