//! Playlist resolution: the pure core that turns a station's tag rules into
//! the set of qualifying tracks.
//!
//! The resolver never touches storage and cannot fail; callers supply the
//! active tracks (inactive ones must already be filtered out) and the
//! station's rule set. Output order is a full shuffle on every call - the
//! non-reproducible "radio feel" ordering is the contract, not an accident.

use crate::models::{RuleKind, StationRule, TaggedTrack};
use rand::seq::SliceRandom;
use std::collections::HashSet;
use uuid::Uuid;

/// Compute the tracks qualifying for a station and hand them back shuffled.
///
/// Rules partition into three tag-id sets: require (track must carry every
/// tag), include (track must carry at least one tag), exclude (any match
/// disqualifies). The three conditions are AND-ed; an empty rule set matches
/// every supplied track. Exclusion always wins: a track carrying both a
/// required and an excluded tag is dropped.
///
/// A rule whose tag id no longer exists in the library simply never matches
/// any track - require/include rules over it cannot be satisfied and exclude
/// rules over it never trigger.
pub fn resolve(tracks: Vec<TaggedTrack>, rules: &[StationRule]) -> Vec<TaggedTrack> {
    let mut require = HashSet::new();
    let mut include = HashSet::new();
    let mut exclude = HashSet::new();

    for rule in rules {
        match rule.kind {
            RuleKind::Require => require.insert(rule.tag_id),
            RuleKind::Include => include.insert(rule.tag_id),
            RuleKind::Exclude => exclude.insert(rule.tag_id),
        };
    }

    let mut matched: Vec<TaggedTrack> = tracks
        .into_iter()
        .filter(|t| qualifies(&t.tag_ids, &require, &include, &exclude))
        .collect();

    matched.shuffle(&mut rand::thread_rng());
    matched
}

fn qualifies(
    tags: &HashSet<Uuid>,
    require: &HashSet<Uuid>,
    include: &HashSet<Uuid>,
    exclude: &HashSet<Uuid>,
) -> bool {
    if !require.is_subset(tags) {
        return false;
    }
    if !include.is_empty() && include.is_disjoint(tags) {
        return false;
    }
    // Exclusion dominates: even a track satisfying require/include is
    // dropped on any excluded tag.
    exclude.is_disjoint(tags)
}
