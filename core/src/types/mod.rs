//! Domain models for the v2 API.
//!
//! # Design
//! Every entity splits into an always-present core (decoding fails without
//! it) and optional attributes that are only returned when requested through
//! the matching field selector. Optional attributes decode independently via
//! `lenient`, so a value the client does not understand leaves one attribute
//! unset instead of failing the entity. Entities are plain values: no
//! mutation after decoding, no back-references to the envelope.

pub(crate) mod lenient;
mod media;
mod metrics;
mod place;
mod poll;
mod tweet;
mod user;

pub use media::{Media, MediaKind};
pub use metrics::{
    EngagementMetrics, MediaPublicMetrics, MediaTrackedMetrics, PlaybackMetrics, PrivateMetrics,
    TrackedMetrics, TweetPublicMetrics, UserMetrics,
};
pub use place::{Place, PlaceGeo};
pub use poll::{Poll, PollOption, VotingStatus};
pub use tweet::{
    AnnotationEntity, Attachments, Coordinates, Geo, MentionEntity, ReferenceKind,
    ReferencedTweet, ReplyAudience, TagEntity, TextEntities, Tweet, UrlEntity, Withheld,
};
pub use user::{UrlList, User, UserEntities};
