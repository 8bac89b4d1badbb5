//! Side-loaded entities and id-keyed lookup over them.
//!
//! # Design
//! `Includes` is what the server returned under `includes`; it is never
//! merged into the primary entities. `IncludesIndex` borrows an `Includes`
//! and builds one hash map per entity type so callers can join by id at read
//! time. One included author backing many tweets is stored once.

use std::collections::HashMap;

use serde::Deserialize;

use crate::fields::{EntityKind, Expansion, Origin};
use crate::types::lenient;
use crate::types::{Media, Place, Poll, Tweet, User};

/// Related entities returned alongside primary data.
///
/// Each list decodes item by item: an included entity missing its core
/// attributes is dropped without affecting its siblings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Includes {
    #[serde(default, deserialize_with = "lenient::items")]
    pub users: Vec<User>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub tweets: Vec<Tweet>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub media: Vec<Media>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub polls: Vec<Poll>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub places: Vec<Place>,
}

impl Includes {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.tweets.is_empty()
            && self.media.is_empty()
            && self.polls.is_empty()
            && self.places.is_empty()
    }

    pub fn index(&self) -> IncludesIndex<'_> {
        IncludesIndex::new(self)
    }
}

/// A borrowed included entity of any type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Included<'a> {
    Tweet(&'a Tweet),
    User(&'a User),
    Media(&'a Media),
    Poll(&'a Poll),
    Place(&'a Place),
}

impl Included<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Included::Tweet(_) => EntityKind::Tweet,
            Included::User(_) => EntityKind::User,
            Included::Media(_) => EntityKind::Media,
            Included::Poll(_) => EntityKind::Poll,
            Included::Place(_) => EntityKind::Place,
        }
    }

    /// Id of the entity (`media_key` for media).
    pub fn key(&self) -> &str {
        match self {
            Included::Tweet(t) => &t.id,
            Included::User(u) => &u.id,
            Included::Media(m) => &m.media_key,
            Included::Poll(p) => &p.id,
            Included::Place(p) => &p.id,
        }
    }
}

/// Id-keyed view over an `Includes`.
#[derive(Debug, Default)]
pub struct IncludesIndex<'a> {
    users: HashMap<&'a str, &'a User>,
    usernames: HashMap<&'a str, &'a User>,
    tweets: HashMap<&'a str, &'a Tweet>,
    media: HashMap<&'a str, &'a Media>,
    polls: HashMap<&'a str, &'a Poll>,
    places: HashMap<&'a str, &'a Place>,
}

impl<'a> IncludesIndex<'a> {
    pub fn new(includes: &'a Includes) -> Self {
        Self {
            users: includes.users.iter().map(|u| (u.id.as_str(), u)).collect(),
            usernames: includes
                .users
                .iter()
                .filter_map(|u| u.username.as_deref().map(|name| (name, u)))
                .collect(),
            tweets: includes.tweets.iter().map(|t| (t.id.as_str(), t)).collect(),
            media: includes
                .media
                .iter()
                .map(|m| (m.media_key.as_str(), m))
                .collect(),
            polls: includes.polls.iter().map(|p| (p.id.as_str(), p)).collect(),
            places: includes.places.iter().map(|p| (p.id.as_str(), p)).collect(),
        }
    }

    pub fn user(&self, id: &str) -> Option<&'a User> {
        self.users.get(id).copied()
    }

    pub fn user_by_username(&self, username: &str) -> Option<&'a User> {
        self.usernames.get(username).copied()
    }

    pub fn tweet(&self, id: &str) -> Option<&'a Tweet> {
        self.tweets.get(id).copied()
    }

    pub fn media(&self, media_key: &str) -> Option<&'a Media> {
        self.media.get(media_key).copied()
    }

    pub fn poll(&self, id: &str) -> Option<&'a Poll> {
        self.polls.get(id).copied()
    }

    pub fn place(&self, id: &str) -> Option<&'a Place> {
        self.places.get(id).copied()
    }

    /// Finds the included entity of `kind` keyed by `key`.
    pub fn lookup(&self, kind: EntityKind, key: &str) -> Option<Included<'a>> {
        match kind {
            EntityKind::Tweet => self.tweet(key).map(Included::Tweet),
            EntityKind::User => self.user(key).map(Included::User),
            EntityKind::Media => self.media(key).map(Included::Media),
            EntityKind::Poll => self.poll(key).map(Included::Poll),
            EntityKind::Place => self.place(key).map(Included::Place),
        }
    }

    /// Follows `expansion` from `primary` to the entities it side-loaded.
    ///
    /// Keys with no included counterpart are skipped, as are unmapped
    /// expansions.
    pub fn resolve<E: Expansion>(&self, primary: &E::Primary, expansion: E) -> Vec<Included<'a>> {
        match expansion.origin() {
            Origin::Id(read) => read(primary)
                .into_iter()
                .filter_map(|key| self.lookup(expansion.related(), key))
                .collect(),
            Origin::Username(read) => read(primary)
                .into_iter()
                .filter_map(|name| self.user_by_username(name).map(Included::User))
                .collect(),
            Origin::Unmapped => Vec::new(),
        }
    }
}
