//! Error types for the v2 API client.
//!
//! # Design
//! Three layers of failure are kept apart:
//! - `ApiError` is one problem item reported by the server, either inside a
//!   successful envelope's `errors` list (partial failure) or as the body of
//!   a non-2xx response.
//! - `Failure` is the one-shot classification of an exchange: a single
//!   problem, several problems, or a transport failure passed through as-is.
//! - `ClientError` is what a `build_*`/`parse_*` call returns when it cannot
//!   hand back an envelope at all.
//!
//! A 2xx envelope carrying `errors` is not a `ClientError`; callers inspect
//! it through `ResponseEnvelope::status` and `ResponseEnvelope::failure`.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::envelope::ResponseEnvelope;
use crate::fields::EntityKind;
use crate::http::TransportError;
use crate::types::lenient;

/// One problem reported by the API.
///
/// Every attribute is optional: problem bodies vary between endpoints and
/// API generations, and an unrecognized shape must still surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub detail: Option<String>,
    /// Problem type URI, e.g. `https://api.twitter.com/2/problems/resource-not-found`.
    #[serde(default, rename = "type", deserialize_with = "lenient::optional")]
    pub problem_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub code: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub resource_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub resource_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub parameter: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub section: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub status: Option<u16>,
}

/// Machine-readable classification of `ApiError::problem_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    NotFound,
    NotAuthorized,
    Forbidden,
    InvalidRequest,
    UsageCapped,
    ResourceUnavailable,
    Other,
}

impl ApiError {
    pub fn kind(&self) -> ProblemKind {
        let Some(uri) = self.problem_type.as_deref() else {
            return ProblemKind::Other;
        };
        match uri.rsplit('/').next().unwrap_or(uri) {
            "resource-not-found" => ProblemKind::NotFound,
            "not-authorized-for-resource" | "unsupported-authentication" => {
                ProblemKind::NotAuthorized
            }
            "client-forbidden" | "disallowed-resource" => ProblemKind::Forbidden,
            "invalid-request" => ProblemKind::InvalidRequest,
            "usage-capped" => ProblemKind::UsageCapped,
            "resource-unavailable" => ProblemKind::ResourceUnavailable,
            _ => ProblemKind::Other,
        }
    }

    /// Most specific human-readable text the problem carries.
    pub fn summary(&self) -> &str {
        self.detail
            .as_deref()
            .or(self.message.as_deref())
            .or(self.title.as_deref())
            .unwrap_or("unknown API error")
    }

    fn looks_like_problem(&self) -> bool {
        self.title.is_some() || self.detail.is_some() || self.message.is_some()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resource_id {
            Some(id) => write!(f, "{} (resource {id})", self.summary()),
            None => f.write_str(self.summary()),
        }
    }
}

impl std::error::Error for ApiError {}

/// Classified outcome of an exchange that did not fully succeed.
#[derive(Debug, Clone, Error)]
pub enum Failure {
    #[error("{0}")]
    Single(ApiError),

    #[error("{} API errors", .0.len())]
    Multiple(Vec<ApiError>),

    #[error("{0}")]
    Transport(TransportError),
}

impl Failure {
    /// `None` for an empty list; `Single` for one item; `Multiple` otherwise.
    pub fn from_errors(errors: &[ApiError]) -> Option<Self> {
        match errors {
            [] => None,
            [only] => Some(Failure::Single(only.clone())),
            many => Some(Failure::Multiple(many.to_vec())),
        }
    }

    /// Classifies the result of one request.
    ///
    /// A decoded envelope is judged by its `errors` list alone, whatever the
    /// HTTP status was; a transport failure is passed through unchanged.
    pub fn classify<D, I>(outcome: Result<&ResponseEnvelope<D, I>, TransportError>) -> Option<Self> {
        match outcome {
            Ok(envelope) => Self::from_errors(&envelope.errors),
            Err(transport) => Some(Failure::Transport(transport)),
        }
    }

    /// Problem items carried by this failure; empty for transport failures.
    pub fn errors(&self) -> &[ApiError] {
        match self {
            Failure::Single(error) => std::slice::from_ref(error),
            Failure::Multiple(errors) => errors,
            Failure::Transport(_) => &[],
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Failure::Transport(_))
    }
}

/// Errors returned by `TwitterClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A nested field selection targets a different entity type than the
    /// expansion it is attached to.
    #[error("expansion `{expansion}` side-loads {expected} objects but nested fields select {found} fields")]
    InvalidSelection {
        expansion: &'static str,
        expected: EntityKind,
        found: EntityKind,
    },

    /// A lookup by ids was given no ids.
    #[error("`{route}` needs at least one id")]
    MissingIds { route: &'static str },

    /// The body is not any recognized envelope shape.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String, body: String },

    /// The API rejected the request with a problem body, or the transport
    /// failed before a response existed.
    #[error(transparent)]
    Failed(#[from] Failure),

    /// A non-2xx status whose body is not a recognizable problem.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

impl From<TransportError> for ClientError {
    fn from(error: TransportError) -> Self {
        ClientError::Failed(Failure::Transport(error))
    }
}

impl ClientError {
    pub(crate) fn malformed(reason: impl Into<String>, body: &[u8]) -> Self {
        ClientError::MalformedResponse {
            reason: reason.into(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Problem items attached to this error, if any.
    pub fn api_errors(&self) -> &[ApiError] {
        match self {
            ClientError::Failed(failure) => failure.errors(),
            _ => &[],
        }
    }
}

/// Maps a non-2xx response to the most specific error its body supports.
///
/// A non-empty `errors` array wins; otherwise a top-level problem object;
/// otherwise the raw status and body.
pub(crate) fn rejection(status: u16, body: &str) -> ClientError {
    let Ok(Value::Object(mut root)) = serde_json::from_str::<Value>(body) else {
        return ClientError::Http {
            status,
            body: body.to_string(),
        };
    };

    if let Some(errors) = root.remove("errors") {
        let items: Vec<ApiError> = lenient::decode_items(errors).unwrap_or_default();
        if let Some(failure) = Failure::from_errors(&items) {
            return ClientError::Failed(failure);
        }
    }

    match ApiError::deserialize(Value::Object(root)) {
        Ok(mut problem) if problem.looks_like_problem() => {
            problem.status.get_or_insert(status);
            ClientError::Failed(Failure::Single(problem))
        }
        _ => ClientError::Http {
            status,
            body: body.to_string(),
        },
    }
}
