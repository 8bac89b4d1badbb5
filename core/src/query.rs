//! Sparse-fieldset request builder.
//!
//! # Design
//! `Query<P>` collects field and expansion selectors for one primary entity
//! type and renders them into the API's query parameters. Selections are
//! insertion-ordered sets: repeats collapse, and the emitted order follows
//! the caller's calls so the request stays readable. Nested field selections
//! for expanded entities are validated against the expansion's related
//! entity type before any parameter is produced.

use indexmap::{IndexMap, IndexSet};

use crate::error::ClientError;
use crate::fields::{
    EntityKind, Expansion, Field, MediaField, PlaceField, PollField, Primary, TweetField,
    UserField,
};
use crate::types::{Tweet, User};

/// Name of the query parameter listing expansions.
pub const EXPANSIONS_PARAM: &str = "expansions";

pub type TweetQuery = Query<Tweet>;
pub type UserQuery = Query<User>;

/// Field selection for the entity type behind an expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedFields {
    Tweet(Vec<TweetField>),
    User(Vec<UserField>),
    Media(Vec<MediaField>),
    Poll(Vec<PollField>),
    Place(Vec<PlaceField>),
}

impl NestedFields {
    pub fn kind(&self) -> EntityKind {
        match self {
            NestedFields::Tweet(_) => EntityKind::Tweet,
            NestedFields::User(_) => EntityKind::User,
            NestedFields::Media(_) => EntityKind::Media,
            NestedFields::Poll(_) => EntityKind::Poll,
            NestedFields::Place(_) => EntityKind::Place,
        }
    }

    pub fn wire_keys(&self) -> Vec<&'static str> {
        match self {
            NestedFields::Tweet(fields) => keys(fields),
            NestedFields::User(fields) => keys(fields),
            NestedFields::Media(fields) => keys(fields),
            NestedFields::Poll(fields) => keys(fields),
            NestedFields::Place(fields) => keys(fields),
        }
    }
}

fn keys<F: Field>(fields: &[F]) -> Vec<&'static str> {
    fields.iter().map(|f| f.wire_key()).collect()
}

/// Field and expansion selection for a request whose primary data is `P`.
#[derive(Debug, Clone)]
pub struct Query<P: Primary> {
    fields: IndexSet<P::Field>,
    expansions: IndexSet<P::Expansion>,
    nested: Vec<(P::Expansion, NestedFields)>,
    params: Vec<(String, String)>,
}

impl<P: Primary> Default for Query<P> {
    fn default() -> Self {
        Self {
            fields: IndexSet::new(),
            expansions: IndexSet::new(),
            nested: Vec::new(),
            params: Vec::new(),
        }
    }
}

impl<P: Primary> Query<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: P::Field) -> Self {
        self.fields.insert(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = P::Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn expand(mut self, expansion: P::Expansion) -> Self {
        self.expansions.insert(expansion);
        self
    }

    /// Expands a relation and selects fields on the entities it side-loads.
    ///
    /// A field type that does not belong to the expansion's related entity
    /// is reported as `InvalidSelection` by `to_params`.
    pub fn expand_with<F: Field>(
        mut self,
        expansion: P::Expansion,
        fields: impl IntoIterator<Item = F>,
    ) -> Self {
        self.expansions.insert(expansion);
        self.nested
            .push((expansion, F::nest(fields.into_iter().collect())));
        self
    }

    /// Adds an endpoint-specific parameter, emitted after the selections.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn selected_fields(&self) -> impl Iterator<Item = P::Field> + '_ {
        self.fields.iter().copied()
    }

    pub fn selected_expansions(&self) -> impl Iterator<Item = P::Expansion> + '_ {
        self.expansions.iter().copied()
    }

    /// Renders the selection as ordered `(name, comma-joined values)` pairs.
    ///
    /// Order: primary `<kind>.fields`, `expansions`, related `<kind>.fields`
    /// in first-requested order, then endpoint parameters. Empty categories
    /// are omitted.
    pub fn to_params(&self) -> Result<Vec<(String, String)>, ClientError> {
        let primary = <P::Field as Field>::KIND;

        let mut by_kind: IndexMap<EntityKind, IndexSet<&'static str>> = IndexMap::new();
        by_kind.insert(primary, self.fields.iter().map(|f| f.wire_key()).collect());

        for (expansion, nested) in &self.nested {
            if nested.kind() != expansion.related() {
                return Err(ClientError::InvalidSelection {
                    expansion: expansion.wire_key(),
                    expected: expansion.related(),
                    found: nested.kind(),
                });
            }
            by_kind
                .entry(nested.kind())
                .or_default()
                .extend(nested.wire_keys());
        }

        let mut params = Vec::new();
        let mut kinds = by_kind.into_iter();
        if let Some((kind, keys)) = kinds.next() {
            push_joined(&mut params, kind.fields_param(), keys);
        }
        push_joined(
            &mut params,
            EXPANSIONS_PARAM,
            self.expansions.iter().map(|e| e.wire_key()),
        );
        for (kind, keys) in kinds {
            push_joined(&mut params, kind.fields_param(), keys);
        }
        params.extend(self.params.iter().cloned());
        Ok(params)
    }
}

fn push_joined<'a>(
    params: &mut Vec<(String, String)>,
    name: &str,
    values: impl IntoIterator<Item = &'a str>,
) {
    let values: Vec<&str> = values.into_iter().collect();
    if values.is_empty() {
        return;
    }
    params.push((name.to_string(), values.join(",")));
}
