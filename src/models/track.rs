use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;
use validator::Validate;

/// A single audio file in the library. Only `active` tracks are ever
/// eligible for station resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Uuid,
    pub title: String,
    pub filename: String,
    pub duration_seconds: Option<i64>,
    pub file_size_bytes: Option<i64>,
    pub active: bool,
    pub play_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A track together with its tag-membership set - the resolver's input.
/// The set is unordered and duplicate-free; an empty set is a valid state.
#[derive(Debug, Clone, Serialize)]
pub struct TaggedTrack {
    #[serde(flatten)]
    pub track: Track,
    pub tag_ids: HashSet<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTrackRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 1024))]
    pub filename: String,
    pub duration_seconds: Option<i64>,
    pub file_size_bytes: Option<i64>,
    pub active: Option<bool>,
    pub tag_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTrackRequest {
    pub title: Option<String>,
    pub filename: Option<String>,
    pub duration_seconds: Option<i64>,
    pub file_size_bytes: Option<i64>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct SetTrackTagsRequest {
    pub tag_ids: Vec<Uuid>,
}
