use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, fixtures};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let resp = app()
        .oneshot(Request::builder().uri(uri).body(String::new()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    (status, body_json(resp).await)
}

fn keys(object: &Value) -> Vec<String> {
    let mut keys: Vec<String> = object.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    keys
}

// --- single tweet ---

#[tokio::test]
async fn tweet_defaults_only() {
    let (status, body) = get(&format!("/2/tweets/{}", fixtures::PLAIN_TWEET_ID)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(keys(&body["data"]), vec!["id", "text"]);
    assert!(body.get("includes").is_none());
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn tweet_with_fields_and_author_expansion() {
    let (status, body) =
        get("/2/tweets/1?tweet.fields=created_at,lang&expansions=author_id&user.fields=created_at")
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(keys(&body["data"]), vec!["created_at", "id", "lang", "text"]);
    let users = body["includes"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], fixtures::PLAIN_USER_ID);
    assert_eq!(keys(&users[0]), vec!["created_at", "id", "name", "username"]);
}

#[tokio::test]
async fn tweet_not_found_is_reported_in_errors() {
    let (status, body) = get("/2/tweets/9").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("data").is_none());
    assert_eq!(body["errors"][0]["resource_id"], "9");
    assert_eq!(body["errors"][0]["parameter"], "id");
}

#[tokio::test]
async fn every_tweet_expansion_side_loads() {
    let uri = format!(
        "/2/tweets/{}?expansions=attachments.media_keys,attachments.poll_ids,geo.place_id,referenced_tweets.id,author_id",
        fixtures::ANNOUNCEMENT_TWEET_ID
    );
    let (_, body) = get(&uri).await;
    let includes = &body["includes"];
    assert_eq!(includes["media"][0]["media_key"], fixtures::MEDIA_KEY);
    assert_eq!(includes["polls"][0]["id"], fixtures::POLL_ID);
    assert_eq!(includes["places"][0]["id"], fixtures::PLACE_ID);
    assert_eq!(includes["tweets"][0]["id"], fixtures::PLAIN_TWEET_ID);
    assert_eq!(includes["users"][0]["id"], fixtures::DEV_USER_ID);
}

#[tokio::test]
async fn unknown_field_is_rejected() {
    let (status, body) = get("/2/tweets/1?tweet.fields=text,bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Invalid Request");
    assert_eq!(body["errors"][0]["parameters"]["tweet.fields"][0], "bogus");
}

#[tokio::test]
async fn user_expansion_on_tweet_route_is_rejected() {
    let (status, _) = get("/2/tweets/1?expansions=pinned_tweet_id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// --- tweet lookup by ids ---

#[tokio::test]
async fn tweets_partial_result() {
    let (status, body) = get("/2/tweets?ids=1,9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"][0]["parameter"], "ids");
}

#[tokio::test]
async fn tweets_without_ids_is_rejected() {
    let (status, _) = get("/2/tweets").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// --- users ---

#[tokio::test]
async fn user_by_username_with_pinned_tweet() {
    let (status, body) =
        get("/2/users/by/username/TwitterDev?expansions=pinned_tweet_id&tweet.fields=lang").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], fixtures::DEV_USER_ID);
    let pinned = &body["includes"]["tweets"][0];
    assert_eq!(pinned["id"], fixtures::ANNOUNCEMENT_TWEET_ID);
    assert_eq!(keys(pinned), vec!["id", "lang", "text"]);
}

#[tokio::test]
async fn users_by_ids_dedupe_nothing_and_report_missing() {
    let (_, body) = get("/2/users?ids=42,783214,0").await;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["42", "783214"]);
    assert_eq!(body["errors"][0]["resource_type"], "user");
}

// --- likes ---

#[tokio::test]
async fn liked_tweets_with_meta() {
    let uri = format!("/2/users/{}/liked_tweets?max_results=1", fixtures::DEV_USER_ID);
    let (status, body) = get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["result_count"], 1);
    assert_eq!(body["meta"]["newest_id"], fixtures::PLAIN_TWEET_ID);
}

#[tokio::test]
async fn no_likes_is_meta_only() {
    let uri = format!("/2/users/{}/liked_tweets", fixtures::PLAIN_USER_ID);
    let (_, body) = get(&uri).await;
    assert!(body.get("data").is_none());
    assert_eq!(body["meta"]["result_count"], 0);
}

#[tokio::test]
async fn likes_of_unknown_user() {
    let (_, body) = get("/2/users/0/liked_tweets").await;
    assert_eq!(body["errors"][0]["resource_type"], "user");
}
