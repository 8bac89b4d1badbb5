//! Synchronous client core for the Twitter v2 REST API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! HTTP round-trip, including authentication, making the core deterministic
//! and testable.
//!
//! # Design
//! - `fields` is the static registry of selectable fields and expansions,
//!   each tied to the entity attribute it populates.
//! - `query` turns a selection into ordered query parameters.
//! - `envelope` decodes the `data`/`includes`/`meta`/`errors` body shape
//!   generically over the primary entity type.
//! - `includes` joins primary entities to side-loaded ones by id at read
//!   time; nothing is embedded.
//! - `error` classifies item-level problems and request-level failures.
//! - `TwitterClient` composes the above into one `build_*`/`parse_*` pair
//!   per endpoint.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod fields;
pub mod http;
pub mod includes;
pub mod query;
pub mod types;

pub use client::{TweetResponse, TweetsResponse, TwitterClient, UserResponse, UsersResponse};
pub use config::ClientConfig;
pub use envelope::{DecodeData, EnvelopeStatus, IncludesSection, Meta, ResponseEnvelope};
pub use error::{ApiError, ClientError, Failure, ProblemKind};
pub use fields::{
    populated, EntityKind, Expansion, Field, MediaField, Origin, PlaceField, PollField, Primary,
    Target, TweetExpansion, TweetField, UserExpansion, UserField,
};
pub use http::{HttpMethod, HttpRequest, HttpResponse, TransportError};
pub use includes::{Included, Includes, IncludesIndex};
pub use query::{NestedFields, Query, TweetQuery, UserQuery};
pub use types::{Media, Place, Poll, Tweet, User};
