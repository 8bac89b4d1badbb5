//! Generic response envelope decoding.
//!
//! # Design
//! Every v2 response body is an object with up to four sections: `data`,
//! `includes`, `meta` and `errors`. The envelope is generic over the shape of
//! `data` (one entity or a list) through `DecodeData`, and over the includes
//! container. Sections decode independently: one section that fails to
//! decode is logged and left empty. A section only counts as content when
//! it carries something: an `includes` with no entities or a `meta` with no
//! known key is treated as absent, and a body left with nothing is rejected
//! as malformed.
//!
//! The three outcomes of a request that reached the server (complete,
//! partial, failed) stay observable from one value through `status()`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{ApiError, ClientError, Failure};
use crate::includes::{Includes, IncludesIndex};
use crate::types::lenient;
use crate::types::{Media, Place, Poll, Tweet, User};

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope<D, I = Includes> {
    pub data: Option<D>,
    pub includes: Option<I>,
    pub meta: Option<Meta>,
    /// Item-level problems; may sit alongside `data`.
    pub errors: Vec<ApiError>,
}

/// Result-set information attached to list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Meta {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub result_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub next_token: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub previous_token: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub newest_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub oldest_id: Option<String>,
}

/// How far a request succeeded, judged from its envelope alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStatus {
    /// Data (or an empty result) with no reported errors.
    Complete,
    /// At least one entity alongside one or more errors.
    Partial,
    /// Errors and no entity, including an explicitly empty list.
    Failed,
}

/// Decode strategy for the `data` section of an envelope.
pub trait DecodeData: Sized {
    fn decode_data(value: Value) -> Result<Self, serde_json::Error>;

    /// Whether the decoded value holds no entity at all.
    fn is_empty(&self) -> bool {
        false
    }
}

/// Decode strategy for the `includes` section.
pub trait IncludesSection: DeserializeOwned {
    /// Whether no related entity was side-loaded.
    fn is_empty(&self) -> bool;
}

impl IncludesSection for Includes {
    fn is_empty(&self) -> bool {
        Includes::is_empty(self)
    }
}

macro_rules! decode_data {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl DecodeData for $entity {
                fn decode_data(value: Value) -> Result<Self, serde_json::Error> {
                    <$entity>::deserialize(value)
                }
            }

            impl DecodeData for Vec<$entity> {
                /// Items missing core attributes are dropped one by one; a
                /// non-empty list where every item drops does not decode.
                fn decode_data(value: Value) -> Result<Self, serde_json::Error> {
                    let raw = match &value {
                        Value::Array(items) => items.len(),
                        other => {
                            return Err(serde::de::Error::custom(format!(
                                "expected a list of {}, found {}",
                                stringify!($entity),
                                json_type(other)
                            )))
                        }
                    };
                    let items: Vec<$entity> = lenient::decode_items(value).unwrap_or_default();
                    if raw > 0 && items.is_empty() {
                        return Err(serde::de::Error::custom(format!(
                            "none of the {raw} {} items decoded",
                            stringify!($entity)
                        )));
                    }
                    Ok(items)
                }

                fn is_empty(&self) -> bool {
                    self.as_slice().is_empty()
                }
            }
        )+
    };
}

decode_data!(Tweet, User, Media, Poll, Place);

impl<D: DecodeData, I: IncludesSection> ResponseEnvelope<D, I> {
    /// Decodes a raw response body.
    ///
    /// Fails with `MalformedResponse` when the body is not a JSON object or
    /// none of its sections decode to anything. An explicit empty `data` list is a valid
    /// empty result.
    pub fn decode(body: &[u8]) -> Result<Self, ClientError> {
        let mut root = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(root)) => root,
            Ok(other) => {
                return Err(ClientError::malformed(
                    format!("expected a JSON object, found {}", json_type(&other)),
                    body,
                ))
            }
            Err(error) => {
                return Err(ClientError::malformed(format!("invalid JSON: {error}"), body))
            }
        };

        let data = take(&mut root, "data").and_then(|value| {
            D::decode_data(value)
                .map_err(|error| warn!(section = "data", %error, "dropping undecodable section"))
                .ok()
        });
        let includes = take(&mut root, "includes")
            .and_then(|value| section::<I>("includes", value))
            .filter(|includes| !includes.is_empty());
        let meta = take(&mut root, "meta")
            .and_then(|value| section::<Meta>("meta", value))
            .filter(|meta| *meta != Meta::default());
        let errors: Vec<ApiError> = take(&mut root, "errors")
            .and_then(lenient::decode_items)
            .unwrap_or_default();

        if data.is_none() && includes.is_none() && meta.is_none() && errors.is_empty() {
            return Err(ClientError::malformed("no recognizable envelope section", body));
        }

        debug!(
            has_data = data.is_some(),
            has_includes = includes.is_some(),
            has_meta = meta.is_some(),
            errors = errors.len(),
            "decoded envelope"
        );

        Ok(Self {
            data,
            includes,
            meta,
            errors,
        })
    }
}

impl<D: DecodeData, I> ResponseEnvelope<D, I> {
    pub fn status(&self) -> EnvelopeStatus {
        let has_entities = self.data.as_ref().is_some_and(|data| !data.is_empty());
        match (self.errors.is_empty(), has_entities) {
            (true, _) => EnvelopeStatus::Complete,
            (false, true) => EnvelopeStatus::Partial,
            (false, false) => EnvelopeStatus::Failed,
        }
    }
}

impl<D, I> ResponseEnvelope<D, I> {
    /// Aggregated item-level errors, if any were reported.
    pub fn failure(&self) -> Option<Failure> {
        Failure::from_errors(&self.errors)
    }
}

impl<D> ResponseEnvelope<D, Includes> {
    /// Id-keyed lookup over the side-loaded entities; empty when the
    /// response carried no includes.
    pub fn index(&self) -> IncludesIndex<'_> {
        self.includes
            .as_ref()
            .map(IncludesIndex::new)
            .unwrap_or_default()
    }
}

/// Removes `key` from the envelope, treating `null` as absent.
fn take(root: &mut Map<String, Value>, key: &str) -> Option<Value> {
    root.remove(key).filter(|value| !value.is_null())
}

fn section<T: DeserializeOwned>(name: &'static str, value: Value) -> Option<T> {
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(error) => {
            warn!(section = name, %error, "dropping undecodable section");
            None
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TweetEnvelope = ResponseEnvelope<Tweet>;
    type TweetsEnvelope = ResponseEnvelope<Vec<Tweet>>;

    #[test]
    fn data_with_author_include() {
        let body = br#"{"data":{"id":"1","text":"hi","author_id":"42"},"includes":{"users":[{"id":"42","name":"A"}]}}"#;
        let envelope = TweetEnvelope::decode(body).unwrap();
        let tweet = envelope.data.as_ref().unwrap();
        assert_eq!(tweet.id, "1");
        assert_eq!(tweet.text, "hi");
        assert_eq!(envelope.status(), EnvelopeStatus::Complete);
        assert_eq!(envelope.index().user("42").unwrap().name, "A");
    }

    #[test]
    fn data_and_errors_are_both_kept() {
        let body = br#"{
            "data": [{"id":"1","text":"hi"}],
            "errors": [{"resource_id":"2","detail":"Could not find tweet with ids: [2].","title":"Not Found Error"}]
        }"#;
        let envelope = TweetsEnvelope::decode(body).unwrap();
        assert_eq!(envelope.data.as_ref().unwrap().len(), 1);
        assert_eq!(envelope.errors.len(), 1);
        assert_eq!(envelope.status(), EnvelopeStatus::Partial);
        assert!(matches!(envelope.failure(), Some(Failure::Single(_))));
    }

    #[test]
    fn errors_only_is_a_failed_envelope_not_a_decode_error() {
        let body = br#"{"errors":[{"detail":"Could not find tweet","title":"Not Found"}]}"#;
        let envelope = TweetEnvelope::decode(body).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.status(), EnvelopeStatus::Failed);
        match envelope.failure() {
            Some(Failure::Single(error)) => {
                assert_eq!(error.detail.as_deref(), Some("Could not find tweet"));
                assert_eq!(error.title.as_deref(), Some("Not Found"));
            }
            other => panic!("expected single failure, got {other:?}"),
        }
    }

    #[test]
    fn several_errors_aggregate_as_multiple() {
        let body = br#"{"errors":[{"detail":"a"},{"detail":"b"}]}"#;
        let envelope = TweetsEnvelope::decode(body).unwrap();
        assert!(matches!(envelope.failure(), Some(Failure::Multiple(ref e)) if e.len() == 2));
    }

    #[test]
    fn unknown_fields_do_not_fail_the_entity() {
        let body = br#"{"data":{"id":"1","text":"hi","brand_new_field":{"x":1},"lang":"en"},"surprise":true}"#;
        let envelope = TweetEnvelope::decode(body).unwrap();
        let tweet = envelope.data.unwrap();
        assert_eq!(tweet.lang.as_deref(), Some("en"));
    }

    #[test]
    fn negative_metric_is_dropped_on_that_field_only() {
        let body = br#"{"data":{"id":"1","text":"hi","public_metrics":{"like_count":-1,"reply_count":2,"retweet_count":"many","quote_count":0}}}"#;
        let tweet = TweetEnvelope::decode(body).unwrap().data.unwrap();
        let metrics = tweet.public_metrics.unwrap();
        assert_eq!(metrics.engagement.like_count, None);
        assert_eq!(metrics.engagement.reply_count, Some(2));
        assert_eq!(metrics.engagement.retweet_count, None);
        assert_eq!(metrics.quote_count, Some(0));
    }

    #[test]
    fn explicit_empty_list_is_a_valid_empty_result() {
        let envelope = TweetsEnvelope::decode(br#"{"data":[]}"#).unwrap();
        assert_eq!(envelope.data, Some(Vec::new()));
        assert_eq!(envelope.status(), EnvelopeStatus::Complete);
    }

    #[test]
    fn meta_only_list_response_decodes() {
        let envelope = TweetsEnvelope::decode(br#"{"meta":{"result_count":0}}"#).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.meta.unwrap().result_count, Some(0));
    }

    #[test]
    fn empty_or_absent_structures_are_malformed() {
        let bodies: [&[u8]; 10] = [
            b"{}",
            b"null",
            b"[]",
            b"not json",
            br#"{"data":null}"#,
            br#"{"errors":[]}"#,
            br#"{"includes":{}}"#,
            br#"{"includes":{"bogus":1}}"#,
            br#"{"meta":{}}"#,
            br#"{"meta":{"foo":"bar"}}"#,
        ];
        for body in bodies {
            let err = TweetEnvelope::decode(body).unwrap_err();
            match err {
                ClientError::MalformedResponse { body: raw, .. } => {
                    assert_eq!(raw.as_bytes(), body);
                }
                other => panic!("expected MalformedResponse, got {other:?}"),
            }
        }
    }

    #[test]
    fn list_items_missing_core_attributes_are_dropped() {
        let body = br#"{"data":[{"id":"1","text":"a"},{"id":"2"},{"id":"3","text":"c"}]}"#;
        let tweets = TweetsEnvelope::decode(body).unwrap().data.unwrap();
        let ids: Vec<_> = tweets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn list_where_every_item_drops_is_not_an_empty_result() {
        let err = TweetsEnvelope::decode(br#"{"data":[{"id":"1"},{"id":"2"}]}"#).unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse { .. }));

        let body = br#"{"data":[{"id":"1"}],"errors":[{"detail":"x"}]}"#;
        let envelope = TweetsEnvelope::decode(body).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.status(), EnvelopeStatus::Failed);
    }

    #[test]
    fn empty_list_with_errors_is_failed() {
        let body = br#"{"data":[],"errors":[{"resource_id":"9","detail":"Could not find tweet"}]}"#;
        let envelope = TweetsEnvelope::decode(body).unwrap();
        assert_eq!(envelope.data, Some(Vec::new()));
        assert_eq!(envelope.status(), EnvelopeStatus::Failed);
    }

    #[test]
    fn empty_includes_and_unknown_meta_count_as_absent() {
        let body = br#"{"data":{"id":"1","text":"hi"},"includes":{},"meta":{"foo":"bar"}}"#;
        let envelope = TweetEnvelope::decode(body).unwrap();
        assert!(envelope.includes.is_none());
        assert!(envelope.meta.is_none());
        assert_eq!(envelope.status(), EnvelopeStatus::Complete);
    }

    #[test]
    fn wrong_data_shape_leaves_other_sections() {
        let body = br#"{"data":{"id":"1","text":"a"},"errors":[{"detail":"x"}]}"#;
        let envelope = TweetsEnvelope::decode(body).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.status(), EnvelopeStatus::Failed);
    }

    #[test]
    fn paging_meta_decodes() {
        let body = br#"{"data":[{"id":"9","text":"x"}],"meta":{"result_count":1,"next_token":"abc","newest_id":"9","oldest_id":"9"}}"#;
        let meta = TweetsEnvelope::decode(body).unwrap().meta.unwrap();
        assert_eq!(meta.result_count, Some(1));
        assert_eq!(meta.next_token.as_deref(), Some("abc"));
        assert!(meta.previous_token.is_none());
    }

    #[test]
    fn missing_includes_gives_empty_index() {
        let envelope = TweetEnvelope::decode(br#"{"data":{"id":"1","text":"hi"}}"#).unwrap();
        assert!(envelope.index().user("42").is_none());
    }
}
