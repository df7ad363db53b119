use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

/// A virtual playlist defined by a tag-rule policy, not a static track list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub background_video: Option<String>,
    pub background_image: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// How a single tag constrains station membership.
///
/// Closed enum so an unknown kind fails at deserialization or row mapping,
/// never lands in storage as a fourth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Track must carry this tag (AND across all require rules).
    Require,
    /// Track must carry at least one included tag (OR across include rules).
    Include,
    /// Track must not carry this tag; exclusion overrides everything else.
    Exclude,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Require => "require",
            RuleKind::Include => "include",
            RuleKind::Exclude => "exclude",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "require" => Some(RuleKind::Require),
            "include" => Some(RuleKind::Include),
            "exclude" => Some(RuleKind::Exclude),
            _ => None,
        }
    }
}

/// One tag constraint on a station. At most one rule exists per
/// `(station_id, tag_id)` pair; the whole set is replaced atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRule {
    pub station_id: Uuid,
    pub tag_id: Uuid,
    pub kind: RuleKind,
}

/// Wire value for a rule-update entry. `none` means "no rule for this tag",
/// mirroring an absent entry; anything else is a deserialization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleEntry {
    Require,
    Include,
    Exclude,
    None,
}

impl RuleEntry {
    pub fn kind(self) -> Option<RuleKind> {
        match self {
            RuleEntry::Require => Some(RuleKind::Require),
            RuleEntry::Include => Some(RuleKind::Include),
            RuleEntry::Exclude => Some(RuleKind::Exclude),
            RuleEntry::None => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReplaceRulesRequest {
    pub tag_rules: HashMap<Uuid, RuleEntry>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStationRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub slug: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub background_video: Option<String>,
    pub background_image: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub background_video: Option<String>,
    pub background_image: Option<String>,
    pub active: Option<bool>,
}
