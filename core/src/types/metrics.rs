//! Engagement metric records.
//!
//! Each record is defined once and composed into the entities that report
//! it; organic and promoted tweet metrics share one shape. Every count is
//! decoded on its own, so a single negative or non-numeric value leaves only
//! that count unset.

use serde::Deserialize;

use super::lenient;

/// Likes, replies and retweets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngagementMetrics {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub like_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub reply_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub retweet_count: Option<u64>,
}

/// Counts only visible to the owner of the content (user-context auth).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PrivateMetrics {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub impression_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub url_link_clicks: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub user_profile_clicks: Option<u64>,
}

/// `public_metrics` of a tweet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TweetPublicMetrics {
    #[serde(flatten)]
    pub engagement: EngagementMetrics,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub quote_count: Option<u64>,
}

/// `organic_metrics` and `promoted_metrics` of a tweet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TrackedMetrics {
    #[serde(flatten)]
    pub private: PrivateMetrics,
    #[serde(flatten)]
    pub engagement: EngagementMetrics,
}

/// `public_metrics` of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserMetrics {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub followers_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub following_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub tweet_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub listed_count: Option<u64>,
}

/// Video playback quartiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlaybackMetrics {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub playback_0_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub playback_25_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub playback_50_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub playback_75_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub playback_100_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaPublicMetrics {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub view_count: Option<u64>,
}

/// `organic_metrics` and `promoted_metrics` of a media item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaTrackedMetrics {
    #[serde(flatten)]
    pub playback: PlaybackMetrics,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub view_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn public_metrics_compose_engagement() {
        let metrics: TweetPublicMetrics = serde_json::from_value(json!({
            "like_count": 10,
            "reply_count": 2,
            "retweet_count": 3,
            "quote_count": 1
        }))
        .unwrap();
        assert_eq!(metrics.engagement.like_count, Some(10));
        assert_eq!(metrics.engagement.retweet_count, Some(3));
        assert_eq!(metrics.quote_count, Some(1));
    }

    #[test]
    fn negative_count_drops_only_that_count() {
        let metrics: TrackedMetrics = serde_json::from_value(json!({
            "impression_count": 500,
            "url_link_clicks": -1,
            "user_profile_clicks": 4,
            "like_count": "lots",
            "reply_count": 0,
            "retweet_count": 9
        }))
        .unwrap();
        assert_eq!(metrics.private.impression_count, Some(500));
        assert_eq!(metrics.private.url_link_clicks, None);
        assert_eq!(metrics.private.user_profile_clicks, Some(4));
        assert_eq!(metrics.engagement.like_count, None);
        assert_eq!(metrics.engagement.reply_count, Some(0));
        assert_eq!(metrics.engagement.retweet_count, Some(9));
    }

    #[test]
    fn media_tracked_metrics_flatten_playback() {
        let metrics: MediaTrackedMetrics = serde_json::from_value(json!({
            "playback_0_count": 100,
            "playback_100_count": 20,
            "view_count": 80
        }))
        .unwrap();
        assert_eq!(metrics.playback.playback_0_count, Some(100));
        assert_eq!(metrics.playback.playback_50_count, None);
        assert_eq!(metrics.view_count, Some(80));
    }
}
