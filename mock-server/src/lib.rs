//! In-memory emulation of the v2 read endpoints.
//!
//! Responses follow the live API's envelope rules: only default fields plus
//! the requested `<kind>.fields` are returned, expansions side-load related
//! objects under `includes`, ids that do not exist are reported in `errors`
//! with a 200 status, and unknown field or expansion names are rejected with
//! a 400 problem body.

pub mod fixtures;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tracing::debug;

const NOT_FOUND_TYPE: &str = "https://api.twitter.com/2/problems/resource-not-found";
const INVALID_REQUEST_TYPE: &str = "https://api.twitter.com/2/problems/invalid-request";

/// Object types the API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Tweet,
    User,
    Media,
    Poll,
    Place,
}

impl Kind {
    const ALL: [Kind; 5] = [Kind::Tweet, Kind::User, Kind::Media, Kind::Poll, Kind::Place];

    fn name(self) -> &'static str {
        match self {
            Kind::Tweet => "tweet",
            Kind::User => "user",
            Kind::Media => "media",
            Kind::Poll => "poll",
            Kind::Place => "place",
        }
    }

    fn includes_key(self) -> &'static str {
        match self {
            Kind::Tweet => "tweets",
            Kind::User => "users",
            Kind::Media => "media",
            Kind::Poll => "polls",
            Kind::Place => "places",
        }
    }

    fn key_field(self) -> &'static str {
        match self {
            Kind::Media => "media_key",
            _ => "id",
        }
    }

    /// Fields returned whether or not they were requested.
    fn defaults(self) -> &'static [&'static str] {
        match self {
            Kind::Tweet => &["id", "text"],
            Kind::User => &["id", "name", "username"],
            Kind::Media => &["media_key", "type"],
            Kind::Poll => &["id", "options"],
            Kind::Place => &["id", "full_name"],
        }
    }

    fn known_fields(self) -> &'static [&'static str] {
        match self {
            Kind::Tweet => &[
                "attachments",
                "author_id",
                "context_annotations",
                "conversation_id",
                "created_at",
                "entities",
                "geo",
                "id",
                "in_reply_to_user_id",
                "lang",
                "non_public_metrics",
                "public_metrics",
                "organic_metrics",
                "promoted_metrics",
                "possibly_sensitive",
                "referenced_tweets",
                "reply_settings",
                "source",
                "text",
                "withheld",
            ],
            Kind::User => &[
                "created_at",
                "description",
                "entities",
                "id",
                "location",
                "name",
                "pinned_tweet_id",
                "profile_image_url",
                "protected",
                "public_metrics",
                "url",
                "username",
                "verified",
                "withheld",
            ],
            Kind::Media => &[
                "duration_ms",
                "height",
                "media_key",
                "preview_image_url",
                "type",
                "url",
                "width",
                "public_metrics",
                "non_public_metrics",
                "organic_metrics",
                "promoted_metrics",
                "alt_text",
            ],
            Kind::Poll => &["duration_minutes", "end_datetime", "id", "options", "voting_status"],
            Kind::Place => &[
                "contained_within",
                "country",
                "country_code",
                "full_name",
                "geo",
                "id",
                "name",
                "place_type",
            ],
        }
    }

    /// Expansions allowed when this kind is the primary data.
    fn expansions(self) -> &'static [&'static str] {
        match self {
            Kind::Tweet => &[
                "attachments.poll_ids",
                "attachments.media_keys",
                "author_id",
                "entities.mentions.username",
                "geo.place_id",
                "in_reply_to_user_id",
                "referenced_tweets.id",
                "referenced_tweets.id.author_id",
            ],
            Kind::User => &["pinned_tweet_id"],
            _ => &[],
        }
    }
}

/// Seeded, read-only object store.
#[derive(Debug, Default)]
pub struct Store {
    objects: HashMap<Kind, Vec<Value>>,
    likes: HashMap<String, Vec<String>>,
}

impl Store {
    pub fn seeded() -> Self {
        let mut store = Store::default();
        store.objects.insert(Kind::Tweet, fixtures::tweets());
        store.objects.insert(Kind::User, fixtures::users());
        store.objects.insert(Kind::Media, fixtures::media());
        store.objects.insert(Kind::Poll, fixtures::polls());
        store.objects.insert(Kind::Place, fixtures::places());
        store.likes = fixtures::likes()
            .into_iter()
            .map(|(user, tweets)| {
                (user.to_string(), tweets.into_iter().map(String::from).collect())
            })
            .collect();
        store
    }

    pub fn find(&self, kind: Kind, key: &str) -> Option<&Value> {
        self.objects
            .get(&kind)?
            .iter()
            .find(|object| object[kind.key_field()] == key)
    }

    fn find_user_by_username(&self, username: &str) -> Option<&Value> {
        self.objects
            .get(&Kind::User)?
            .iter()
            .find(|user| user["username"] == username)
    }
}

pub type Db = Arc<Store>;

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    Router::new()
        .route("/2/tweets", get(get_tweets))
        .route("/2/tweets/{id}", get(get_tweet))
        .route("/2/users", get(get_users))
        .route("/2/users/{id}", get(get_user))
        .route("/2/users/{id}/liked_tweets", get(liked_tweets))
        .route("/2/users/by/username/{username}", get(get_user_by_username))
        .with_state(Arc::new(store))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Raw query string parameters shared by every route.
#[derive(Debug, Default, Deserialize)]
pub struct Params {
    ids: Option<String>,
    expansions: Option<String>,
    max_results: Option<usize>,
    #[serde(rename = "tweet.fields")]
    tweet_fields: Option<String>,
    #[serde(rename = "user.fields")]
    user_fields: Option<String>,
    #[serde(rename = "media.fields")]
    media_fields: Option<String>,
    #[serde(rename = "poll.fields")]
    poll_fields: Option<String>,
    #[serde(rename = "place.fields")]
    place_fields: Option<String>,
}

/// Validated field and expansion selection.
#[derive(Debug, Default)]
pub struct Selection {
    fields: HashMap<Kind, Vec<String>>,
    expansions: Vec<String>,
}

impl Params {
    fn raw_fields(&self, kind: Kind) -> Option<&str> {
        match kind {
            Kind::Tweet => self.tweet_fields.as_deref(),
            Kind::User => self.user_fields.as_deref(),
            Kind::Media => self.media_fields.as_deref(),
            Kind::Poll => self.poll_fields.as_deref(),
            Kind::Place => self.place_fields.as_deref(),
        }
    }

    fn selection(&self, primary: Kind) -> Result<Selection, Problem> {
        let mut selection = Selection::default();
        for kind in Kind::ALL {
            let param = format!("{}.fields", kind.name());
            let requested = split(self.raw_fields(kind));
            reject_unknown(&param, &requested, kind.known_fields())?;
            selection.fields.insert(kind, requested);
        }
        let expansions = split(self.expansions.as_deref());
        reject_unknown("expansions", &expansions, primary.expansions())?;
        selection.expansions = expansions;
        Ok(selection)
    }

    fn ids(&self) -> Result<Vec<String>, Problem> {
        let ids = split(self.ids.as_deref());
        if ids.is_empty() {
            return Err(Problem::invalid(
                "ids",
                Vec::new(),
                "The `ids` query parameter can not be empty".to_string(),
            ));
        }
        Ok(ids)
    }
}

fn split(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

fn reject_unknown(param: &str, requested: &[String], known: &[&str]) -> Result<(), Problem> {
    let unknown: Vec<&str> = requested
        .iter()
        .map(String::as_str)
        .filter(|value| !known.contains(value))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    Err(Problem::invalid(
        param,
        unknown.iter().map(|value| value.to_string()).collect(),
        format!(
            "The `{param}` query parameter value [{}] is not one of [{}]",
            unknown.join(","),
            known.join(",")
        ),
    ))
}

/// A 400 response with an API problem body.
#[derive(Debug)]
pub struct Problem(Value);

impl Problem {
    fn invalid(param: &str, values: Vec<String>, message: String) -> Self {
        let mut parameters = Map::new();
        parameters.insert(param.to_string(), json!(values));
        Problem(json!({
            "errors": [{ "parameters": parameters, "message": message }],
            "title": "Invalid Request",
            "detail": "One or more parameters to your request was invalid.",
            "type": INVALID_REQUEST_TYPE,
        }))
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self.0)).into_response()
    }
}

fn not_found(kind: Kind, parameter: &str, value: &str) -> Value {
    json!({
        "value": value,
        "detail": format!("Could not find {} with {parameter}: [{value}].", kind.name()),
        "title": "Not Found Error",
        "resource_type": kind.name(),
        "parameter": parameter,
        "resource_id": value,
        "type": NOT_FOUND_TYPE,
    })
}

/// Keeps the default fields plus the requested ones.
fn project(object: &Value, kind: Kind, selection: &Selection) -> Value {
    let requested = selection.fields.get(&kind).map(Vec::as_slice).unwrap_or_default();
    let Value::Object(fields) = object else {
        return object.clone();
    };
    let projected: Map<String, Value> = fields
        .iter()
        .filter(|(name, _)| {
            kind.defaults().contains(&name.as_str()) || requested.iter().any(|r| r == *name)
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    Value::Object(projected)
}

fn strings<'v>(object: &'v Value, pointer: &str) -> Vec<&'v str> {
    match object.pointer(pointer) {
        Some(Value::String(value)) => vec![value.as_str()],
        Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn nested_strings<'v>(object: &'v Value, pointer: &str, key: &str) -> Vec<&'v str> {
    object
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|item| item[key].as_str()).collect())
        .unwrap_or_default()
}

/// Objects side-loaded by one expansion of one primary object.
fn expand<'s>(store: &'s Store, primary: &Value, expansion: &str) -> (Kind, Vec<&'s Value>) {
    let by_id = |kind: Kind, keys: Vec<&str>| -> Vec<&'s Value> {
        keys.into_iter().filter_map(|key| store.find(kind, key)).collect()
    };
    match expansion {
        "author_id" => (Kind::User, by_id(Kind::User, strings(primary, "/author_id"))),
        "in_reply_to_user_id" => (
            Kind::User,
            by_id(Kind::User, strings(primary, "/in_reply_to_user_id")),
        ),
        "entities.mentions.username" => (
            Kind::User,
            nested_strings(primary, "/entities/mentions", "username")
                .into_iter()
                .filter_map(|name| store.find_user_by_username(name))
                .collect(),
        ),
        "attachments.media_keys" => (
            Kind::Media,
            by_id(Kind::Media, strings(primary, "/attachments/media_keys")),
        ),
        "attachments.poll_ids" => (
            Kind::Poll,
            by_id(Kind::Poll, strings(primary, "/attachments/poll_ids")),
        ),
        "geo.place_id" => (Kind::Place, by_id(Kind::Place, strings(primary, "/geo/place_id"))),
        "referenced_tweets.id" => (
            Kind::Tweet,
            by_id(Kind::Tweet, nested_strings(primary, "/referenced_tweets", "id")),
        ),
        "referenced_tweets.id.author_id" => {
            let referenced = by_id(Kind::Tweet, nested_strings(primary, "/referenced_tweets", "id"));
            let authors = referenced
                .into_iter()
                .flat_map(|tweet| strings(tweet, "/author_id"))
                .collect();
            (Kind::User, by_id(Kind::User, authors))
        }
        "pinned_tweet_id" => (Kind::Tweet, by_id(Kind::Tweet, strings(primary, "/pinned_tweet_id"))),
        _ => (Kind::Tweet, Vec::new()),
    }
}

/// Builds a response body from the found primary objects.
fn envelope(
    store: &Store,
    selection: &Selection,
    primary: Kind,
    found: &[&Value],
    single: bool,
    errors: Vec<Value>,
    meta: Option<Value>,
) -> Value {
    let mut body = Map::new();

    if single {
        if let Some(object) = found.first() {
            body.insert("data".into(), project(object, primary, selection));
        }
    } else if !found.is_empty() {
        let data = found.iter().map(|object| project(object, primary, selection)).collect();
        body.insert("data".into(), Value::Array(data));
    }

    let mut included: Vec<(Kind, Vec<&Value>)> = Vec::new();
    for expansion in &selection.expansions {
        for object in found {
            let (kind, related) = expand(store, object, expansion);
            let bucket = match included.iter_mut().position(|(k, _)| *k == kind) {
                Some(at) => &mut included[at].1,
                None => {
                    included.push((kind, Vec::new()));
                    let last = included.len() - 1;
                    &mut included[last].1
                }
            };
            for object in related {
                if !bucket.iter().any(|seen| std::ptr::eq(*seen, object)) {
                    bucket.push(object);
                }
            }
        }
    }
    let includes: Map<String, Value> = included
        .into_iter()
        .filter(|(_, objects)| !objects.is_empty())
        .map(|(kind, objects)| {
            let projected = objects.iter().map(|o| project(o, kind, selection)).collect();
            (kind.includes_key().to_string(), Value::Array(projected))
        })
        .collect();
    if !includes.is_empty() {
        body.insert("includes".into(), Value::Object(includes));
    }

    if let Some(meta) = meta {
        body.insert("meta".into(), meta);
    }
    if !errors.is_empty() {
        body.insert("errors".into(), Value::Array(errors));
    }
    Value::Object(body)
}

async fn get_tweet(
    State(store): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, Problem> {
    debug!(%id, "get tweet");
    let selection = params.selection(Kind::Tweet)?;
    lookup_one(&store, &selection, Kind::Tweet, store.find(Kind::Tweet, &id), "id", &id)
}

async fn get_tweets(State(store): State<Db>, Query(params): Query<Params>) -> Result<Json<Value>, Problem> {
    let ids = params.ids()?;
    debug!(?ids, "get tweets");
    let selection = params.selection(Kind::Tweet)?;
    lookup_many(&store, &selection, Kind::Tweet, &ids)
}

async fn get_user(
    State(store): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, Problem> {
    debug!(%id, "get user");
    let selection = params.selection(Kind::User)?;
    lookup_one(&store, &selection, Kind::User, store.find(Kind::User, &id), "id", &id)
}

async fn get_users(State(store): State<Db>, Query(params): Query<Params>) -> Result<Json<Value>, Problem> {
    let ids = params.ids()?;
    debug!(?ids, "get users");
    let selection = params.selection(Kind::User)?;
    lookup_many(&store, &selection, Kind::User, &ids)
}

async fn get_user_by_username(
    State(store): State<Db>,
    Path(username): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, Problem> {
    debug!(%username, "get user by username");
    let selection = params.selection(Kind::User)?;
    let found = store.find_user_by_username(&username);
    lookup_one(&store, &selection, Kind::User, found, "username", &username)
}

async fn liked_tweets(
    State(store): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, Problem> {
    debug!(%id, "liked tweets");
    let selection = params.selection(Kind::Tweet)?;
    let Some(liked) = store.likes.get(&id) else {
        let errors = vec![not_found(Kind::User, "id", &id)];
        return Ok(Json(envelope(&store, &selection, Kind::Tweet, &[], false, errors, None)));
    };

    let limit = params.max_results.unwrap_or(liked.len());
    let found: Vec<&Value> = liked
        .iter()
        .filter_map(|tweet_id| store.find(Kind::Tweet, tweet_id))
        .take(limit)
        .collect();
    let mut meta = json!({ "result_count": found.len() });
    if let (Some(newest), Some(oldest)) = (found.first(), found.last()) {
        meta["newest_id"] = newest["id"].clone();
        meta["oldest_id"] = oldest["id"].clone();
    }
    Ok(Json(envelope(&store, &selection, Kind::Tweet, &found, false, Vec::new(), Some(meta))))
}

fn lookup_one(
    store: &Store,
    selection: &Selection,
    kind: Kind,
    found: Option<&Value>,
    parameter: &str,
    value: &str,
) -> Result<Json<Value>, Problem> {
    let errors = match found {
        Some(_) => Vec::new(),
        None => vec![not_found(kind, parameter, value)],
    };
    let found: Vec<&Value> = found.into_iter().collect();
    Ok(Json(envelope(store, selection, kind, &found, true, errors, None)))
}

fn lookup_many(
    store: &Store,
    selection: &Selection,
    kind: Kind,
    ids: &[String],
) -> Result<Json<Value>, Problem> {
    let mut found = Vec::new();
    let mut errors = Vec::new();
    for id in ids {
        match store.find(kind, id) {
            Some(object) => found.push(object),
            None => errors.push(not_found(kind, "ids", id)),
        }
    }
    Ok(Json(envelope(store, selection, kind, &found, false, errors, None)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(primary: Kind, query: &[(&str, &str)]) -> Selection {
        let params: Params = serde_json::from_value(
            query
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect::<Map<String, Value>>()
                .into(),
        )
        .unwrap();
        params.selection(primary).unwrap()
    }

    #[test]
    fn projection_keeps_defaults_and_requested_fields() {
        let store = Store::seeded();
        let tweet = store.find(Kind::Tweet, fixtures::ANNOUNCEMENT_TWEET_ID).unwrap();
        let sel = selection(Kind::Tweet, &[("tweet.fields", "lang,source")]);
        let projected = project(tweet, Kind::Tweet, &sel);
        let mut keys: Vec<_> = projected.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["id", "lang", "source", "text"]);
    }

    #[test]
    fn unknown_field_is_a_problem() {
        let params = Params {
            user_fields: Some("name,shoe_size".into()),
            ..Params::default()
        };
        let Problem(body) = params.selection(Kind::User).unwrap_err();
        assert_eq!(body["type"], INVALID_REQUEST_TYPE);
        assert!(body["errors"][0]["message"].as_str().unwrap().contains("[shoe_size]"));
    }

    #[test]
    fn expansions_are_checked_against_the_primary_kind() {
        let params = Params {
            expansions: Some("author_id".into()),
            ..Params::default()
        };
        assert!(params.selection(Kind::Tweet).is_ok());
        assert!(params.selection(Kind::User).is_err());
    }

    #[test]
    fn mention_expansion_resolves_by_username() {
        let store = Store::seeded();
        let tweet = store.find(Kind::Tweet, fixtures::ANNOUNCEMENT_TWEET_ID).unwrap();
        let (kind, users) = expand(&store, tweet, "entities.mentions.username");
        assert_eq!(kind, Kind::User);
        assert_eq!(users[0]["id"], fixtures::PLATFORM_USER_ID);
    }

    #[test]
    fn referenced_authors_follow_two_hops() {
        let store = Store::seeded();
        let reply = store.find(Kind::Tweet, fixtures::REPLY_TWEET_ID).unwrap();
        let (_, users) = expand(&store, reply, "referenced_tweets.id.author_id");
        assert_eq!(users[0]["id"], fixtures::DEV_USER_ID);
    }

    #[test]
    fn includes_are_deduplicated() {
        let store = Store::seeded();
        let tweet = store.find(Kind::Tweet, fixtures::ANNOUNCEMENT_TWEET_ID).unwrap();
        let sel = selection(
            Kind::Tweet,
            &[("expansions", "in_reply_to_user_id,entities.mentions.username")],
        );
        let body = envelope(&store, &sel, Kind::Tweet, &[tweet], true, Vec::new(), None);
        assert_eq!(body["includes"]["users"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn missing_single_object_gives_errors_only() {
        let store = Store::seeded();
        let sel = Selection::default();
        let Json(body) = lookup_one(&store, &sel, Kind::Tweet, None, "id", "9").unwrap();
        assert!(body.get("data").is_none());
        assert_eq!(body["errors"][0]["resource_id"], "9");
        assert_eq!(body["errors"][0]["type"], NOT_FOUND_TYPE);
    }
}
