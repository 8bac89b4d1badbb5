use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::lenient;
use super::metrics::UserMetrics;
use super::tweet::{TextEntities, UrlEntity, Withheld};

/// A user account. `id` and `name` are always returned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    /// Display name.
    pub name: String,
    /// Handle, without the leading `@`. The live API always sends it, but
    /// minimal side-loaded users may omit it.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub entities: Option<UserEntities>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub pinned_tweet_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub profile_image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub protected: Option<bool>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub public_metrics: Option<UserMetrics>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub verified: Option<bool>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub withheld: Option<Withheld>,
}

/// Entities parsed out of the profile URL and description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserEntities {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub url: Option<UrlList>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub description: Option<TextEntities>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UrlList {
    #[serde(default, deserialize_with = "lenient::items")]
    pub urls: Vec<UrlEntity>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_metrics_drop_bad_counts_only() {
        let user: User = serde_json::from_value(json!({
            "id": "42",
            "name": "A",
            "username": "a_user",
            "public_metrics": {
                "followers_count": 12,
                "following_count": -4,
                "tweet_count": 300,
                "listed_count": 1
            }
        }))
        .unwrap();
        let metrics = user.public_metrics.unwrap();
        assert_eq!(metrics.followers_count, Some(12));
        assert_eq!(metrics.following_count, None);
        assert_eq!(metrics.tweet_count, Some(300));
    }

    #[test]
    fn missing_name_fails_the_user() {
        let result: Result<User, _> =
            serde_json::from_value(json!({ "id": "42", "username": "a_user" }));
        assert!(result.is_err());
    }

    #[test]
    fn username_may_be_absent() {
        let user: User = serde_json::from_value(json!({ "id": "42", "name": "A" })).unwrap();
        assert!(user.username.is_none());
    }

    #[test]
    fn profile_entities_decode() {
        let user: User = serde_json::from_value(json!({
            "id": "42",
            "name": "A",
            "username": "a_user",
            "entities": {
                "url": { "urls": [{ "start": 0, "end": 23, "url": "https://t.co/x" }] },
                "description": { "hashtags": [{ "start": 5, "end": 9, "tag": "rust" }] }
            }
        }))
        .unwrap();
        let entities = user.entities.unwrap();
        assert_eq!(entities.url.unwrap().urls[0].url, "https://t.co/x");
        assert_eq!(entities.description.unwrap().hashtags.unwrap()[0].tag, "rust");
    }
}
