//! Seed data served by the mock API.
//!
//! Each object carries every field its type can return, so sparse-fieldset
//! projection is the only thing deciding what a response contains.

use serde_json::{json, Value};

pub const DEV_USER_ID: &str = "2244994945";
pub const PLATFORM_USER_ID: &str = "783214";
pub const PLAIN_USER_ID: &str = "42";

pub const ANNOUNCEMENT_TWEET_ID: &str = "1460323737035677698";
pub const REPLY_TWEET_ID: &str = "1460321468617224194";
pub const PLAIN_TWEET_ID: &str = "1";

pub const MEDIA_KEY: &str = "7_1460322765254168577";
pub const POLL_ID: &str = "1460323737024315393";
pub const PLACE_ID: &str = "01a9a39529b27f36";

pub fn users() -> Vec<Value> {
    vec![
        json!({
            "id": DEV_USER_ID,
            "name": "Twitter Dev",
            "username": "TwitterDev",
            "created_at": "2013-12-14T04:35:55.000Z",
            "description": "The voice of the #TwitterDev team and your official source for updates.",
            "entities": {
                "url": {
                    "urls": [{
                        "start": 0,
                        "end": 23,
                        "url": "https://t.co/3ZX3TNiZCY",
                        "expanded_url": "https://developer.twitter.com/en/community",
                        "display_url": "developer.twitter.com/en/community"
                    }]
                },
                "description": {
                    "hashtags": [{ "start": 17, "end": 28, "tag": "TwitterDev" }]
                }
            },
            "location": "127.0.0.1",
            "pinned_tweet_id": ANNOUNCEMENT_TWEET_ID,
            "profile_image_url": "https://pbs.twimg.com/profile_images/1445764922474827784/W2zEPN7U_normal.jpg",
            "protected": false,
            "public_metrics": {
                "followers_count": 513958,
                "following_count": 2039,
                "tweet_count": 3635,
                "listed_count": 1672
            },
            "url": "https://t.co/3ZX3TNiZCY",
            "verified": true,
            "withheld": { "country_codes": ["XY"], "scope": "user" }
        }),
        json!({
            "id": PLATFORM_USER_ID,
            "name": "Twitter",
            "username": "Twitter",
            "created_at": "2007-02-20T14:35:54.000Z",
            "description": "what's happening?!",
            "protected": false,
            "public_metrics": {
                "followers_count": 62000000,
                "following_count": 3,
                "tweet_count": 15000,
                "listed_count": 90000
            },
            "verified": true
        }),
        json!({
            "id": PLAIN_USER_ID,
            "name": "A",
            "username": "a_user",
            "created_at": "2020-01-01T00:00:00.000Z",
            "protected": false
        }),
    ]
}

pub fn tweets() -> Vec<Value> {
    vec![
        json!({
            "id": ANNOUNCEMENT_TWEET_ID,
            "text": "Introducing a new era for the Twitter Developer Platform! $TWTR #TwitterAPI @Twitter https://t.co/3ZX3TNiZCY",
            "attachments": {
                "media_keys": [MEDIA_KEY],
                "poll_ids": [POLL_ID]
            },
            "author_id": DEV_USER_ID,
            "context_annotations": [{
                "domain": { "id": "46", "name": "Brand Category" },
                "entity": { "id": "781974596752842752", "name": "Services" }
            }],
            "conversation_id": ANNOUNCEMENT_TWEET_ID,
            "created_at": "2021-11-15T21:27:32.000Z",
            "entities": {
                "annotations": [{
                    "start": 30,
                    "end": 55,
                    "probability": 0.63,
                    "type": "Product",
                    "normalized_text": "Twitter Developer Platform"
                }],
                "cashtags": [{ "start": 58, "end": 63, "tag": "TWTR" }],
                "hashtags": [{ "start": 64, "end": 75, "tag": "TwitterAPI" }],
                "mentions": [{ "start": 76, "end": 84, "username": "Twitter", "id": PLATFORM_USER_ID }],
                "urls": [{
                    "start": 85,
                    "end": 108,
                    "url": "https://t.co/3ZX3TNiZCY",
                    "expanded_url": "https://developer.twitter.com/en/community",
                    "display_url": "developer.twitter.com/en/community",
                    "status": 200,
                    "title": "Community",
                    "unwound_url": "https://developer.twitter.com/en/community"
                }]
            },
            "geo": {
                "coordinates": { "type": "Point", "coordinates": [-73.99, 40.73] },
                "place_id": PLACE_ID
            },
            "in_reply_to_user_id": PLATFORM_USER_ID,
            "lang": "en",
            "non_public_metrics": {
                "impression_count": 95000,
                "url_link_clicks": 1200,
                "user_profile_clicks": 340
            },
            "organic_metrics": {
                "impression_count": 90000,
                "like_count": 1100,
                "reply_count": 80,
                "retweet_count": 410,
                "url_link_clicks": 1150,
                "user_profile_clicks": 320
            },
            "promoted_metrics": {
                "impression_count": 5000,
                "like_count": 40,
                "reply_count": 2,
                "retweet_count": 9,
                "url_link_clicks": 50,
                "user_profile_clicks": 20
            },
            "public_metrics": {
                "retweet_count": 419,
                "reply_count": 82,
                "like_count": 1140,
                "quote_count": 61
            },
            "possibly_sensitive": false,
            "referenced_tweets": [{ "type": "quoted", "id": PLAIN_TWEET_ID }],
            "reply_settings": "everyone",
            "source": "Twitter Web App",
            "withheld": { "copyright": false, "country_codes": ["DE"] }
        }),
        json!({
            "id": REPLY_TWEET_ID,
            "text": "@TwitterDev Thanks!",
            "author_id": PLATFORM_USER_ID,
            "conversation_id": ANNOUNCEMENT_TWEET_ID,
            "created_at": "2021-11-15T21:30:01.000Z",
            "entities": {
                "mentions": [{ "start": 0, "end": 11, "username": "TwitterDev", "id": DEV_USER_ID }]
            },
            "in_reply_to_user_id": DEV_USER_ID,
            "lang": "en",
            "public_metrics": {
                "retweet_count": 0,
                "reply_count": 0,
                "like_count": 12,
                "quote_count": 0
            },
            "referenced_tweets": [{ "type": "replied_to", "id": ANNOUNCEMENT_TWEET_ID }],
            "reply_settings": "everyone",
            "source": "Twitter for iPhone"
        }),
        json!({
            "id": PLAIN_TWEET_ID,
            "text": "hi",
            "author_id": PLAIN_USER_ID,
            "conversation_id": PLAIN_TWEET_ID,
            "created_at": "2021-01-01T12:00:00.000Z",
            "lang": "en"
        }),
    ]
}

pub fn media() -> Vec<Value> {
    vec![json!({
        "media_key": MEDIA_KEY,
        "type": "video",
        "duration_ms": 46947,
        "height": 1080,
        "width": 1920,
        "preview_image_url": "https://pbs.twimg.com/amplify_video_thumb/1460322765254168577/img/preview.jpg",
        "url": "https://video.twimg.com/amplify_video/1460322765254168577/vid/1280x720/clip.mp4",
        "alt_text": "Developer platform launch video",
        "public_metrics": { "view_count": 30512 },
        "non_public_metrics": {
            "playback_0_count": 1200,
            "playback_25_count": 900,
            "playback_50_count": 700,
            "playback_75_count": 400,
            "playback_100_count": 250
        },
        "organic_metrics": {
            "playback_0_count": 1100,
            "playback_25_count": 850,
            "playback_50_count": 650,
            "playback_75_count": 380,
            "playback_100_count": 240,
            "view_count": 29000
        },
        "promoted_metrics": {
            "playback_0_count": 100,
            "playback_25_count": 50,
            "playback_50_count": 50,
            "playback_75_count": 20,
            "playback_100_count": 10,
            "view_count": 1512
        }
    })]
}

pub fn polls() -> Vec<Value> {
    vec![json!({
        "id": POLL_ID,
        "options": [
            { "position": 1, "label": "v2 all the way", "votes": 1204 },
            { "position": 2, "label": "still on v1.1", "votes": 311 }
        ],
        "duration_minutes": 1440,
        "end_datetime": "2021-11-16T21:27:32.000Z",
        "voting_status": "closed"
    })]
}

pub fn places() -> Vec<Value> {
    vec![json!({
        "id": PLACE_ID,
        "full_name": "Manhattan, NY",
        "contained_within": ["96683cc9126741d1"],
        "country": "United States",
        "country_code": "US",
        "geo": {
            "type": "Feature",
            "bbox": [-74.026675, 40.683935, -73.910408, 40.877483],
            "properties": {}
        },
        "name": "Manhattan",
        "place_type": "city"
    })]
}

/// Liked tweet ids per user, newest first.
pub fn likes() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        (DEV_USER_ID, vec![PLAIN_TWEET_ID, REPLY_TWEET_ID]),
        (PLATFORM_USER_ID, vec![ANNOUNCEMENT_TWEET_ID]),
        (PLAIN_USER_ID, Vec::new()),
    ]
}
