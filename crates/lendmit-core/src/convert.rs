// ── Response-shape matching and normalization ──
//
// The server's listing, intent and following answers are not stable.
// Each tolerated wire shape is a variant; `recognize` runs the matchers
// in priority order against the generic JSON value and returns the first
// that fits, or `None` when none do.

use serde_json::{Map, Value};

use crate::model::Resource;

// ── Helpers ────────────────────────────────────────────────────────

/// JavaScript-style truthiness, which is what the server's loosely typed
/// flags are written against.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > f64::EPSILON),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A field holding a non-empty string.
fn non_empty_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// A field usable as an identifier: a non-empty string or a number.
fn identifier(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect()
}

/// Drop repeated identifiers, keeping first occurrence order.
fn dedup_ordered(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

// ── Resource listings ──────────────────────────────────────────────

/// Tolerated shapes of a resource listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListingShape<'a> {
    /// `[ {...}, {...} ]`
    Bare(&'a [Value]),
    /// `{ "resources": [ {...} ] }`
    Wrapped(&'a [Value]),
}

impl<'a> ListingShape<'a> {
    pub fn recognize(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::Bare(items)),
            Value::Object(obj) => match obj.get("resources") {
                Some(Value::Array(items)) => Some(Self::Wrapped(items)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn items(&self) -> &'a [Value] {
        match self {
            Self::Bare(items) | Self::Wrapped(items) => items,
        }
    }
}

/// Field names the server has used for a resource's identifier, in
/// priority order.
const RESOURCE_ID_FIELDS: [&str; 4] = ["id", "_id", "resourceID", "resource"];

/// Normalize one raw listing item into a canonical [`Resource`].
///
/// Numeric identifiers are kept as their decimal text. Missing
/// identifier, owner or name become empty strings; missing or non-string
/// category/description become `None`.
pub fn normalize_resource(raw: &Value) -> Resource {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    let id = RESOURCE_ID_FIELDS
        .iter()
        .find_map(|key| identifier(obj, key))
        .unwrap_or_default();
    let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_owned);

    Resource {
        id,
        owner: text("owner").unwrap_or_default(),
        name: text("name").unwrap_or_default(),
        category: text("category"),
        description: text("description"),
    }
}

/// Recognize a listing and normalize every item, or `None` on shape mismatch.
pub fn normalize_listing(value: &Value) -> Option<Vec<Resource>> {
    ListingShape::recognize(value).map(|shape| shape.items().iter().map(normalize_resource).collect())
}

// ── Followee lists ─────────────────────────────────────────────────

/// Tolerated shapes of a `getFollowees` answer, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolloweeShape {
    /// `[ { "followeeIDs": ["a", "b"] } ]`
    WrappedIdList(Vec<String>),
    /// `{ "followeeIDs": ["a", "b"] }`
    IdList(Vec<String>),
    /// `["a", "b"]`
    Flat(Vec<String>),
    /// `[ { "followee": "a" }, { "followee": "b" } ]`
    Records(Vec<String>),
    /// `[ { "follower": { "followee": "a" } } ]`
    NestedRecords(Vec<String>),
}

type FolloweeMatcher = fn(&Value) -> Option<FolloweeShape>;

const FOLLOWEE_MATCHERS: [FolloweeMatcher; 5] = [
    match_wrapped_id_list,
    match_id_list,
    match_flat,
    match_records,
    match_nested_records,
];

fn match_wrapped_id_list(value: &Value) -> Option<FolloweeShape> {
    let first = value.as_array()?.first()?;
    let ids = first.get("followeeIDs")?.as_array()?;
    Some(FolloweeShape::WrappedIdList(string_items(ids)))
}

fn match_id_list(value: &Value) -> Option<FolloweeShape> {
    let ids = value.as_object()?.get("followeeIDs")?.as_array()?;
    Some(FolloweeShape::IdList(string_items(ids)))
}

fn match_flat(value: &Value) -> Option<FolloweeShape> {
    let items = value.as_array()?;
    items
        .iter()
        .all(Value::is_string)
        .then(|| FolloweeShape::Flat(string_items(items)))
}

/// Every element yields a string via `extract`, or the shape does not match.
fn collect_all(items: &[Value], extract: impl Fn(&Value) -> Option<&str>) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| extract(item).map(str::to_owned))
        .collect()
}

fn match_records(value: &Value) -> Option<FolloweeShape> {
    let items = value.as_array()?;
    collect_all(items, |item| item.get("followee")?.as_str()).map(FolloweeShape::Records)
}

fn match_nested_records(value: &Value) -> Option<FolloweeShape> {
    let items = value.as_array()?;
    collect_all(items, |item| item.get("follower")?.get("followee")?.as_str())
        .map(FolloweeShape::NestedRecords)
}

impl FolloweeShape {
    pub fn recognize(value: &Value) -> Option<Self> {
        FOLLOWEE_MATCHERS.iter().find_map(|matcher| matcher(value))
    }

    pub fn into_ids(self) -> Vec<String> {
        match self {
            Self::WrappedIdList(ids)
            | Self::IdList(ids)
            | Self::Flat(ids)
            | Self::Records(ids)
            | Self::NestedRecords(ids) => ids,
        }
    }
}

/// Canonical ordered, duplicate-free followee list. Unrecognized shapes
/// yield an empty list rather than an error.
pub fn normalize_followees(value: &Value) -> Vec<String> {
    FolloweeShape::recognize(value)
        .map(FolloweeShape::into_ids)
        .map(dedup_ordered)
        .unwrap_or_default()
}

// ── Intent lookups ─────────────────────────────────────────────────

/// Tolerated shapes of a `getIntent` answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentShape {
    /// `{ "intent": "lend" }`
    Direct(String),
    /// `[ { "intent": "lend" } ]`
    FirstElement(String),
}

impl IntentShape {
    pub fn recognize(value: &Value) -> Option<Self> {
        if let Some(intent) = value.as_object().and_then(|o| non_empty_str(o, "intent")) {
            return Some(Self::Direct(intent.to_owned()));
        }
        value
            .as_array()?
            .first()?
            .as_object()
            .and_then(|o| non_empty_str(o, "intent"))
            .map(|intent| Self::FirstElement(intent.to_owned()))
    }

    pub fn into_intent(self) -> String {
        match self {
            Self::Direct(s) | Self::FirstElement(s) => s,
        }
    }
}

// ── Follow-status probe ────────────────────────────────────────────

/// Tolerated shapes of an `isFollowing` answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowStatusShape {
    /// `[ { "isFollowing": true } ]`
    ArrayWrapped(bool),
    /// `{ "isFollowing": true }`
    Direct(bool),
}

impl FollowStatusShape {
    pub fn recognize(value: &Value) -> Option<Self> {
        if let Some(flag) = value
            .as_array()
            .and_then(|items| items.first())
            .and_then(|first| first.get("isFollowing"))
        {
            return Some(Self::ArrayWrapped(truthy(flag)));
        }
        value
            .as_object()?
            .get("isFollowing")
            .map(|flag| Self::Direct(truthy(flag)))
    }

    pub fn is_following(self) -> bool {
        match self {
            Self::ArrayWrapped(b) | Self::Direct(b) => b,
        }
    }
}
