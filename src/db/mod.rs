//! SQLite persistence. Runtime queries with manual row mapping; UUIDs are
//! stored as hyphenated TEXT and parsed at this boundary.

pub mod rules;
pub mod stations;
pub mod tags;
pub mod tracks;

use crate::error::{AppError, Result};
use uuid::Uuid;

/// Embedded migrations, shared by `main` and the integration tests.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

pub(crate) fn parse_uuid(value: &str, column: &str) -> Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid UUID in {column}: {e}")))
}
