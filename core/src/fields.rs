//! Field and expansion selectors.
//!
//! # Design
//! Each entity type has a closed enumeration of the optional attributes the
//! API can be asked to return (`TweetField`, `UserField`, ...) and each
//! primary entity an enumeration of the relations it can side-load
//! (`TweetExpansion`, `UserExpansion`). Every selector carries its exact
//! wire key plus an explicit mapping back to the decoded model:
//!
//! - a field maps to a presence probe on the entity (`Target::Mapped`), or is
//!   `Target::Unmapped` when it only asks the server for data the client does
//!   not model (`context_annotations`);
//! - an expansion maps to the foreign keys it follows on the primary entity
//!   (`Origin`), or is `Origin::Unmapped` when those keys live elsewhere.
//!
//! The enumerations are `Copy` constants; nothing here is mutable.

use std::fmt;
use std::hash::Hash;

use crate::query::NestedFields;
use crate::types::{Media, Place, Poll, Tweet, User};

/// Entity types that can appear as primary data or in `includes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Tweet,
    User,
    Media,
    Poll,
    Place,
}

impl EntityKind {
    /// Query parameter carrying the field selection for this kind.
    pub const fn fields_param(self) -> &'static str {
        match self {
            EntityKind::Tweet => "tweet.fields",
            EntityKind::User => "user.fields",
            EntityKind::Media => "media.fields",
            EntityKind::Poll => "poll.fields",
            EntityKind::Place => "place.fields",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EntityKind::Tweet => "tweet",
            EntityKind::User => "user",
            EntityKind::Media => "media",
            EntityKind::Poll => "poll",
            EntityKind::Place => "place",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a decoded field lands on its entity.
pub enum Target<E> {
    /// Reports whether the attribute is populated on a decoded entity.
    Mapped(fn(&E) -> bool),
    /// Requested from the server only; the client does not model it.
    Unmapped,
}

impl<E> Clone for Target<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Target<E> {}

impl<E> fmt::Debug for Target<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Mapped(_) => f.write_str("Mapped"),
            Target::Unmapped => f.write_str("Unmapped"),
        }
    }
}

/// How an expansion finds its foreign keys on the primary entity.
pub enum Origin<P> {
    /// Keys are ids of the related entity (`media_key` for media).
    Id(fn(&P) -> Vec<&str>),
    /// Keys are usernames.
    Username(fn(&P) -> Vec<&str>),
    Unmapped,
}

impl<P> Clone for Origin<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Origin<P> {}

impl<P> fmt::Debug for Origin<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Id(_) => f.write_str("Id"),
            Origin::Username(_) => f.write_str("Username"),
            Origin::Unmapped => f.write_str("Unmapped"),
        }
    }
}

/// A selectable optional attribute of one entity type.
pub trait Field: Copy + Eq + Hash + fmt::Debug + 'static {
    type Entity;

    const KIND: EntityKind;

    /// Every selector of this entity type, in declaration order.
    const ALL: &'static [Self];

    fn wire_key(self) -> &'static str;

    fn target(self) -> Target<Self::Entity>;

    /// Wraps a selection of this type for use under an expansion.
    fn nest(fields: Vec<Self>) -> NestedFields;
}

/// A relation from a primary entity to another entity type.
pub trait Expansion: Copy + Eq + Hash + fmt::Debug + 'static {
    type Primary;

    const ALL: &'static [Self];

    fn wire_key(self) -> &'static str;

    /// Entity type the expansion side-loads into `includes`.
    fn related(self) -> EntityKind;

    fn origin(self) -> Origin<Self::Primary>;
}

/// An entity that can be requested as primary data.
pub trait Primary: Sized {
    type Field: Field<Entity = Self>;
    type Expansion: Expansion<Primary = Self>;
}

/// Mapped selectors whose attribute is populated on `entity`.
pub fn populated<F: Field>(entity: &F::Entity) -> Vec<F> {
    F::ALL
        .iter()
        .copied()
        .filter(|field| matches!(field.target(), Target::Mapped(is_set) if is_set(entity)))
        .collect()
}

macro_rules! selectors {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $key:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }

            pub fn from_wire_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

selectors! {
    /// Optional tweet attributes (`tweet.fields`).
    TweetField {
        Attachments => "attachments",
        AuthorId => "author_id",
        ContextAnnotations => "context_annotations",
        ConversationId => "conversation_id",
        CreatedAt => "created_at",
        Entities => "entities",
        Geo => "geo",
        Id => "id",
        InReplyToUserId => "in_reply_to_user_id",
        Lang => "lang",
        NonPublicMetrics => "non_public_metrics",
        PublicMetrics => "public_metrics",
        OrganicMetrics => "organic_metrics",
        PromotedMetrics => "promoted_metrics",
        PossiblySensitive => "possibly_sensitive",
        ReferencedTweets => "referenced_tweets",
        ReplySettings => "reply_settings",
        Source => "source",
        Text => "text",
        Withheld => "withheld",
    }
}

selectors! {
    /// Optional user attributes (`user.fields`).
    UserField {
        CreatedAt => "created_at",
        Description => "description",
        Entities => "entities",
        Id => "id",
        Location => "location",
        Name => "name",
        PinnedTweetId => "pinned_tweet_id",
        ProfileImageUrl => "profile_image_url",
        Protected => "protected",
        PublicMetrics => "public_metrics",
        Url => "url",
        Username => "username",
        Verified => "verified",
        Withheld => "withheld",
    }
}

selectors! {
    /// Optional media attributes (`media.fields`).
    MediaField {
        DurationMs => "duration_ms",
        Height => "height",
        MediaKey => "media_key",
        PreviewImageUrl => "preview_image_url",
        Type => "type",
        Url => "url",
        Width => "width",
        PublicMetrics => "public_metrics",
        NonPublicMetrics => "non_public_metrics",
        OrganicMetrics => "organic_metrics",
        PromotedMetrics => "promoted_metrics",
        AltText => "alt_text",
    }
}

selectors! {
    /// Optional poll attributes (`poll.fields`).
    PollField {
        DurationMinutes => "duration_minutes",
        EndDatetime => "end_datetime",
        Id => "id",
        Options => "options",
        VotingStatus => "voting_status",
    }
}

selectors! {
    /// Optional place attributes (`place.fields`).
    PlaceField {
        ContainedWithin => "contained_within",
        Country => "country",
        CountryCode => "country_code",
        FullName => "full_name",
        Geo => "geo",
        Id => "id",
        Name => "name",
        PlaceType => "place_type",
    }
}

selectors! {
    /// Relations a tweet can side-load (`expansions`).
    TweetExpansion {
        PollIds => "attachments.poll_ids",
        MediaKeys => "attachments.media_keys",
        AuthorId => "author_id",
        MentionedUsers => "entities.mentions.username",
        PlaceId => "geo.place_id",
        InReplyToUserId => "in_reply_to_user_id",
        ReferencedTweetIds => "referenced_tweets.id",
        ReferencedTweetAuthorIds => "referenced_tweets.id.author_id",
    }
}

selectors! {
    /// Relations a user can side-load (`expansions`).
    UserExpansion {
        PinnedTweetId => "pinned_tweet_id",
    }
}

impl Field for TweetField {
    type Entity = Tweet;

    const KIND: EntityKind = EntityKind::Tweet;
    const ALL: &'static [Self] = Self::VARIANTS;

    fn wire_key(self) -> &'static str {
        self.as_str()
    }

    fn target(self) -> Target<Tweet> {
        match self {
            TweetField::Attachments => Target::Mapped(|t| t.attachments.is_some()),
            TweetField::AuthorId => Target::Mapped(|t| t.author_id.is_some()),
            TweetField::ContextAnnotations => Target::Unmapped,
            TweetField::ConversationId => Target::Mapped(|t| t.conversation_id.is_some()),
            TweetField::CreatedAt => Target::Mapped(|t| t.created_at.is_some()),
            TweetField::Entities => Target::Mapped(|t| t.entities.is_some()),
            TweetField::Geo => Target::Mapped(|t| t.geo.is_some()),
            TweetField::Id | TweetField::Text => Target::Mapped(|_| true),
            TweetField::InReplyToUserId => Target::Mapped(|t| t.in_reply_to_user_id.is_some()),
            TweetField::Lang => Target::Mapped(|t| t.lang.is_some()),
            TweetField::NonPublicMetrics => Target::Mapped(|t| t.non_public_metrics.is_some()),
            TweetField::PublicMetrics => Target::Mapped(|t| t.public_metrics.is_some()),
            TweetField::OrganicMetrics => Target::Mapped(|t| t.organic_metrics.is_some()),
            TweetField::PromotedMetrics => Target::Mapped(|t| t.promoted_metrics.is_some()),
            TweetField::PossiblySensitive => Target::Mapped(|t| t.possibly_sensitive.is_some()),
            TweetField::ReferencedTweets => Target::Mapped(|t| t.referenced_tweets.is_some()),
            TweetField::ReplySettings => Target::Mapped(|t| t.reply_settings.is_some()),
            TweetField::Source => Target::Mapped(|t| t.source.is_some()),
            TweetField::Withheld => Target::Mapped(|t| t.withheld.is_some()),
        }
    }

    fn nest(fields: Vec<Self>) -> NestedFields {
        NestedFields::Tweet(fields)
    }
}

impl Field for UserField {
    type Entity = User;

    const KIND: EntityKind = EntityKind::User;
    const ALL: &'static [Self] = Self::VARIANTS;

    fn wire_key(self) -> &'static str {
        self.as_str()
    }

    fn target(self) -> Target<User> {
        match self {
            UserField::Id | UserField::Name => Target::Mapped(|_| true),
            UserField::Username => Target::Mapped(|u| u.username.is_some()),
            UserField::CreatedAt => Target::Mapped(|u| u.created_at.is_some()),
            UserField::Description => Target::Mapped(|u| u.description.is_some()),
            UserField::Entities => Target::Mapped(|u| u.entities.is_some()),
            UserField::Location => Target::Mapped(|u| u.location.is_some()),
            UserField::PinnedTweetId => Target::Mapped(|u| u.pinned_tweet_id.is_some()),
            UserField::ProfileImageUrl => Target::Mapped(|u| u.profile_image_url.is_some()),
            UserField::Protected => Target::Mapped(|u| u.protected.is_some()),
            UserField::PublicMetrics => Target::Mapped(|u| u.public_metrics.is_some()),
            UserField::Url => Target::Mapped(|u| u.url.is_some()),
            UserField::Verified => Target::Mapped(|u| u.verified.is_some()),
            UserField::Withheld => Target::Mapped(|u| u.withheld.is_some()),
        }
    }

    fn nest(fields: Vec<Self>) -> NestedFields {
        NestedFields::User(fields)
    }
}

impl Field for MediaField {
    type Entity = Media;

    const KIND: EntityKind = EntityKind::Media;
    const ALL: &'static [Self] = Self::VARIANTS;

    fn wire_key(self) -> &'static str {
        self.as_str()
    }

    fn target(self) -> Target<Media> {
        match self {
            MediaField::MediaKey | MediaField::Type => Target::Mapped(|_| true),
            MediaField::DurationMs => Target::Mapped(|m| m.duration_ms.is_some()),
            MediaField::Height => Target::Mapped(|m| m.height.is_some()),
            MediaField::PreviewImageUrl => Target::Mapped(|m| m.preview_image_url.is_some()),
            MediaField::Url => Target::Mapped(|m| m.url.is_some()),
            MediaField::Width => Target::Mapped(|m| m.width.is_some()),
            MediaField::PublicMetrics => Target::Mapped(|m| m.public_metrics.is_some()),
            MediaField::NonPublicMetrics => Target::Mapped(|m| m.non_public_metrics.is_some()),
            MediaField::OrganicMetrics => Target::Mapped(|m| m.organic_metrics.is_some()),
            MediaField::PromotedMetrics => Target::Mapped(|m| m.promoted_metrics.is_some()),
            MediaField::AltText => Target::Mapped(|m| m.alt_text.is_some()),
        }
    }

    fn nest(fields: Vec<Self>) -> NestedFields {
        NestedFields::Media(fields)
    }
}

impl Field for PollField {
    type Entity = Poll;

    const KIND: EntityKind = EntityKind::Poll;
    const ALL: &'static [Self] = Self::VARIANTS;

    fn wire_key(self) -> &'static str {
        self.as_str()
    }

    fn target(self) -> Target<Poll> {
        match self {
            PollField::Id | PollField::Options => Target::Mapped(|_| true),
            PollField::DurationMinutes => Target::Mapped(|p| p.duration_minutes.is_some()),
            PollField::EndDatetime => Target::Mapped(|p| p.end_datetime.is_some()),
            PollField::VotingStatus => Target::Mapped(|p| p.voting_status.is_some()),
        }
    }

    fn nest(fields: Vec<Self>) -> NestedFields {
        NestedFields::Poll(fields)
    }
}

impl Field for PlaceField {
    type Entity = Place;

    const KIND: EntityKind = EntityKind::Place;
    const ALL: &'static [Self] = Self::VARIANTS;

    fn wire_key(self) -> &'static str {
        self.as_str()
    }

    fn target(self) -> Target<Place> {
        match self {
            PlaceField::Id | PlaceField::FullName => Target::Mapped(|_| true),
            PlaceField::ContainedWithin => Target::Mapped(|p| p.contained_within.is_some()),
            PlaceField::Country => Target::Mapped(|p| p.country.is_some()),
            PlaceField::CountryCode => Target::Mapped(|p| p.country_code.is_some()),
            PlaceField::Geo => Target::Mapped(|p| p.geo.is_some()),
            PlaceField::Name => Target::Mapped(|p| p.name.is_some()),
            PlaceField::PlaceType => Target::Mapped(|p| p.place_type.is_some()),
        }
    }

    fn nest(fields: Vec<Self>) -> NestedFields {
        NestedFields::Place(fields)
    }
}

impl Expansion for TweetExpansion {
    type Primary = Tweet;

    const ALL: &'static [Self] = Self::VARIANTS;

    fn wire_key(self) -> &'static str {
        self.as_str()
    }

    fn related(self) -> EntityKind {
        match self {
            TweetExpansion::PollIds => EntityKind::Poll,
            TweetExpansion::MediaKeys => EntityKind::Media,
            TweetExpansion::PlaceId => EntityKind::Place,
            TweetExpansion::ReferencedTweetIds => EntityKind::Tweet,
            TweetExpansion::AuthorId
            | TweetExpansion::MentionedUsers
            | TweetExpansion::InReplyToUserId
            | TweetExpansion::ReferencedTweetAuthorIds => EntityKind::User,
        }
    }

    fn origin(self) -> Origin<Tweet> {
        match self {
            TweetExpansion::PollIds => Origin::Id(poll_ids),
            TweetExpansion::MediaKeys => Origin::Id(media_keys),
            TweetExpansion::AuthorId => Origin::Id(author_id),
            TweetExpansion::MentionedUsers => Origin::Username(mentioned_usernames),
            TweetExpansion::PlaceId => Origin::Id(place_id),
            TweetExpansion::InReplyToUserId => Origin::Id(in_reply_to_user_id),
            TweetExpansion::ReferencedTweetIds => Origin::Id(referenced_tweet_ids),
            // The author ids sit on the included tweets, not on the primary.
            TweetExpansion::ReferencedTweetAuthorIds => Origin::Unmapped,
        }
    }
}

impl Expansion for UserExpansion {
    type Primary = User;

    const ALL: &'static [Self] = Self::VARIANTS;

    fn wire_key(self) -> &'static str {
        self.as_str()
    }

    fn related(self) -> EntityKind {
        match self {
            UserExpansion::PinnedTweetId => EntityKind::Tweet,
        }
    }

    fn origin(self) -> Origin<User> {
        match self {
            UserExpansion::PinnedTweetId => Origin::Id(pinned_tweet_id),
        }
    }
}

impl Primary for Tweet {
    type Field = TweetField;
    type Expansion = TweetExpansion;
}

impl Primary for User {
    type Field = UserField;
    type Expansion = UserExpansion;
}

fn one(key: Option<&String>) -> Vec<&str> {
    key.map(String::as_str).into_iter().collect()
}

fn many(keys: Option<&Vec<String>>) -> Vec<&str> {
    keys.map(|keys| keys.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

fn poll_ids(tweet: &Tweet) -> Vec<&str> {
    many(tweet.attachments.as_ref().and_then(|a| a.poll_ids.as_ref()))
}

fn media_keys(tweet: &Tweet) -> Vec<&str> {
    many(tweet.attachments.as_ref().and_then(|a| a.media_keys.as_ref()))
}

fn author_id(tweet: &Tweet) -> Vec<&str> {
    one(tweet.author_id.as_ref())
}

fn mentioned_usernames(tweet: &Tweet) -> Vec<&str> {
    tweet
        .entities
        .as_ref()
        .and_then(|e| e.mentions.as_ref())
        .map(|mentions| mentions.iter().map(|m| m.username.as_str()).collect())
        .unwrap_or_default()
}

fn place_id(tweet: &Tweet) -> Vec<&str> {
    one(tweet.geo.as_ref().and_then(|g| g.place_id.as_ref()))
}

fn in_reply_to_user_id(tweet: &Tweet) -> Vec<&str> {
    one(tweet.in_reply_to_user_id.as_ref())
}

fn referenced_tweet_ids(tweet: &Tweet) -> Vec<&str> {
    tweet
        .referenced_tweets
        .as_ref()
        .map(|refs| refs.iter().map(|r| r.id.as_str()).collect())
        .unwrap_or_default()
}

fn pinned_tweet_id(user: &User) -> Vec<&str> {
    one(user.pinned_tweet_id.as_ref())
}
