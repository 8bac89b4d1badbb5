use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::lenient;
use super::metrics::{PrivateMetrics, TrackedMetrics, TweetPublicMetrics};

/// A tweet. `id` and `text` are always returned; everything else is only
/// populated when the matching `TweetField` was requested.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,

    #[serde(default, deserialize_with = "lenient::optional")]
    pub attachments: Option<Attachments>,

    /// Id of the user who posted this tweet.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub author_id: Option<String>,

    /// Id of the tweet that started the conversation this tweet belongs to.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub conversation_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional")]
    pub created_at: Option<DateTime<Utc>>,

    /// Entities parsed out of the text.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub entities: Option<TextEntities>,

    #[serde(default, deserialize_with = "lenient::optional")]
    pub geo: Option<Geo>,

    /// For replies, the author of the original tweet. Not necessarily a user
    /// mentioned in the text.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub in_reply_to_user_id: Option<String>,

    /// BCP47 language tag, when detected.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub lang: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional")]
    pub non_public_metrics: Option<PrivateMetrics>,

    #[serde(default, deserialize_with = "lenient::optional")]
    pub organic_metrics: Option<TrackedMetrics>,

    #[serde(default, deserialize_with = "lenient::optional")]
    pub promoted_metrics: Option<TrackedMetrics>,

    #[serde(default, deserialize_with = "lenient::optional")]
    pub public_metrics: Option<TweetPublicMetrics>,

    /// Set when a link in the tweet may point to sensitive content.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub possibly_sensitive: Option<bool>,

    #[serde(default, deserialize_with = "lenient::optional")]
    pub referenced_tweets: Option<Vec<ReferencedTweet>>,

    #[serde(default, deserialize_with = "lenient::optional")]
    pub reply_settings: Option<ReplyAudience>,

    /// Name of the app the tweet was posted from.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub source: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional")]
    pub withheld: Option<Withheld>,
}

/// Who may reply to a tweet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ReplyAudience {
    #[serde(rename = "everyone")]
    Everyone,
    #[serde(rename = "following", alias = "followers")]
    Following,
    #[serde(rename = "mentionedUsers", alias = "mentioned_users")]
    MentionedUsers,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Attachments {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub media_keys: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub poll_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReferencedTweet {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Retweeted,
    Quoted,
    RepliedTo,
}

/// Entities found in a piece of text (a tweet, or a user description).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextEntities {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub annotations: Option<Vec<AnnotationEntity>>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub cashtags: Option<Vec<TagEntity>>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub hashtags: Option<Vec<TagEntity>>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub mentions: Option<Vec<MentionEntity>>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub urls: Option<Vec<UrlEntity>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnnotationEntity {
    pub start: u32,
    pub end: u32,
    pub probability: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub normalized_text: String,
}

/// A hashtag or cashtag, without its leading sigil.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagEntity {
    pub start: u32,
    pub end: u32,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MentionEntity {
    pub start: u32,
    pub end: u32,
    pub username: String,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UrlEntity {
    pub start: u32,
    pub end: u32,
    pub url: String,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub expanded_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub display_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub unwound_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub status: Option<u16>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub media_key: Option<String>,
}

/// Location tagged by the author.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Geo {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub place_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

/// Withholding details for withheld content or accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Withheld {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub copyright: Option<bool>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub country_codes: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub scope: Option<String>,
}
