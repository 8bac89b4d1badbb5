//! Stateless request builder and response parser for the v2 API.
//!
//! # Design
//! `TwitterClient` holds only its base URL and an optional user agent and
//! carries no mutable state between calls. Each endpoint is split into a
//! `build_*` method that renders a `Query` into an `HttpRequest` and a
//! `parse_*` method that turns an `HttpResponse` into a typed envelope. The
//! caller executes the HTTP round-trip (and signs it), keeping the core
//! deterministic and free of I/O.

use tracing::debug;

use crate::config::ClientConfig;
use crate::envelope::{DecodeData, ResponseEnvelope};
use crate::error::{rejection, ClientError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{TweetQuery, UserQuery};
use crate::types::{Tweet, User};

pub type TweetResponse = ResponseEnvelope<Tweet>;
pub type TweetsResponse = ResponseEnvelope<Vec<Tweet>>;
pub type UserResponse = ResponseEnvelope<User>;
pub type UsersResponse = ResponseEnvelope<Vec<User>>;

/// Synchronous, stateless client for the v2 API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    base_url: String,
    user_agent: Option<String>,
}

impl TwitterClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            ..Self::new(&config.base_url)
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /2/tweets/{id}`
    pub fn build_get_tweet(&self, id: &str, query: &TweetQuery) -> Result<HttpRequest, ClientError> {
        Ok(self.get(format!("/2/tweets/{id}"), query.to_params()?))
    }

    /// `GET /2/tweets?ids=...`
    pub fn build_get_tweets(&self, ids: &[&str], query: &TweetQuery) -> Result<HttpRequest, ClientError> {
        Ok(self.get("/2/tweets".to_string(), with_ids("/2/tweets", ids, query.to_params()?)?))
    }

    /// `GET /2/users/{id}/liked_tweets`
    pub fn build_liked_tweets(&self, user_id: &str, query: &TweetQuery) -> Result<HttpRequest, ClientError> {
        Ok(self.get(format!("/2/users/{user_id}/liked_tweets"), query.to_params()?))
    }

    /// `GET /2/users/{id}`
    pub fn build_get_user(&self, id: &str, query: &UserQuery) -> Result<HttpRequest, ClientError> {
        Ok(self.get(format!("/2/users/{id}"), query.to_params()?))
    }

    /// `GET /2/users?ids=...`
    pub fn build_get_users(&self, ids: &[&str], query: &UserQuery) -> Result<HttpRequest, ClientError> {
        Ok(self.get("/2/users".to_string(), with_ids("/2/users", ids, query.to_params()?)?))
    }

    /// `GET /2/users/by/username/{username}`
    pub fn build_get_user_by_username(
        &self,
        username: &str,
        query: &UserQuery,
    ) -> Result<HttpRequest, ClientError> {
        let username = username.trim_start_matches('@');
        Ok(self.get(format!("/2/users/by/username/{username}"), query.to_params()?))
    }

    pub fn parse_get_tweet(&self, response: HttpResponse) -> Result<TweetResponse, ClientError> {
        parse_envelope(response)
    }

    pub fn parse_get_tweets(&self, response: HttpResponse) -> Result<TweetsResponse, ClientError> {
        parse_envelope(response)
    }

    pub fn parse_liked_tweets(&self, response: HttpResponse) -> Result<TweetsResponse, ClientError> {
        parse_envelope(response)
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<UserResponse, ClientError> {
        parse_envelope(response)
    }

    pub fn parse_get_users(&self, response: HttpResponse) -> Result<UsersResponse, ClientError> {
        parse_envelope(response)
    }

    pub fn parse_get_user_by_username(&self, response: HttpResponse) -> Result<UserResponse, ClientError> {
        parse_envelope(response)
    }

    fn get(&self, route: String, query: Vec<(String, String)>) -> HttpRequest {
        let headers = self
            .user_agent
            .iter()
            .map(|agent| ("user-agent".to_string(), agent.clone()))
            .collect();
        let request = HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{route}", self.base_url),
            query,
            headers,
            body: None,
        };
        debug!(method = request.method.as_str(), url = %request.url(), "built request");
        request
    }
}

/// Prepends the comma-joined `ids` parameter to the rendered selection.
fn with_ids(
    route: &'static str,
    ids: &[&str],
    params: Vec<(String, String)>,
) -> Result<Vec<(String, String)>, ClientError> {
    if ids.is_empty() {
        return Err(ClientError::MissingIds { route });
    }
    let mut query = Vec::with_capacity(params.len() + 1);
    query.push(("ids".to_string(), ids.join(",")));
    query.extend(params);
    Ok(query)
}

/// Decodes a 2xx body into an envelope; anything else becomes a `ClientError`.
fn parse_envelope<D: DecodeData>(response: HttpResponse) -> Result<ResponseEnvelope<D>, ClientError> {
    if !(200..300).contains(&response.status) {
        debug!(status = response.status, "request rejected");
        return Err(rejection(response.status, &response.body));
    }
    ResponseEnvelope::decode(response.body.as_bytes())
}
