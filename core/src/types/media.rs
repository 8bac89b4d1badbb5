use serde::Deserialize;

use super::lenient;
use super::metrics::{MediaPublicMetrics, MediaTrackedMetrics, PlaybackMetrics};

/// An attached photo, video or GIF, keyed by `media_key`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Media {
    pub media_key: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,

    /// Milliseconds, for videos.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub duration_ms: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub height: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub preview_image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub alt_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub public_metrics: Option<MediaPublicMetrics>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub non_public_metrics: Option<PlaybackMetrics>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub organic_metrics: Option<MediaTrackedMetrics>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub promoted_metrics: Option<MediaTrackedMetrics>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
    AnimatedGif,
    #[serde(other)]
    Other,
}
