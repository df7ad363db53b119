pub mod station;
pub mod tag;
pub mod track;

pub use station::{
    CreateStationRequest, ReplaceRulesRequest, RuleEntry, RuleKind, Station, StationRule,
    UpdateStationRequest,
};
pub use tag::{CreateTagRequest, Tag, UpdateTagRequest};
pub use track::{CreateTrackRequest, SetTrackTagsRequest, TaggedTrack, Track, UpdateTrackRequest};
