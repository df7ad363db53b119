use crate::db::parse_uuid;
use crate::error::{AppError, Result};
use crate::models::{RuleKind, StationRule};
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use uuid::Uuid;

pub async fn for_station(pool: &SqlitePool, station_id: Uuid) -> Result<Vec<StationRule>> {
    let rows = sqlx::query("SELECT tag_id, kind FROM station_rules WHERE station_id = ?")
        .bind(station_id.to_string())
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| {
            let kind: String = row.get("kind");
            Ok(StationRule {
                station_id,
                tag_id: parse_uuid(row.get("tag_id"), "station_rules.tag_id")?,
                kind: RuleKind::parse(&kind).ok_or_else(|| {
                    AppError::Internal(anyhow::anyhow!("unknown rule kind in storage: {kind}"))
                })?,
            })
        })
        .collect()
}

/// Replace a station's entire rule set: delete everything, then bulk-insert
/// the new rules, inside one transaction. Readers observe either the old or
/// the new set, never a half-replaced one; any failure rolls back to the
/// previously committed rules. Replaying the same map is a no-op.
pub async fn replace(
    pool: &SqlitePool,
    station_id: Uuid,
    rules: &HashMap<Uuid, RuleKind>,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM station_rules WHERE station_id = ?")
        .bind(station_id.to_string())
        .execute(&mut *tx)
        .await?;

    for (tag_id, kind) in rules {
        sqlx::query("INSERT INTO station_rules (station_id, tag_id, kind) VALUES (?, ?, ?)")
            .bind(station_id.to_string())
            .bind(tag_id.to_string())
            .bind(kind.as_str())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(())
}
