//! Request and response entities exchanged with the chat backend.
//!
//! Both entities are request-scoped: a [`Query`] lives for one submission and
//! a [`PlaceCard`] for one render.
//!
//! # Example
//!
//! ```rust
//! use geochat::place::{PlaceCard, Query};
//!
//! assert!(Query::parse("   ").is_none());
//! let query = Query::parse("  Kyoto ").unwrap();
//! assert_eq!(query.as_str(), "Kyoto");
//!
//! let card: PlaceCard = serde_json::from_str(r#"{"answer": "Hi", "source_data": {}}"#).unwrap();
//! assert_eq!(card.answer, "Hi");
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// A trimmed, non-empty user query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Trim `raw` and wrap it, or return `None` when nothing is left.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    /// The trimmed query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a fact field holds a displayable value.
///
/// A value is present when it is defined, non-empty and non-zero. Zero is
/// treated as missing, so a population of 0 or a coordinate of 0.0 shows the
/// placeholder.
pub trait Presence {
    /// `true` when the value should be shown as-is.
    fn is_present(&self) -> bool;
}

impl Presence for Number {
    fn is_present(&self) -> bool {
        self.as_f64().is_some_and(|v| v.abs() > 0.0)
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for Value {
    fn is_present(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.is_present(),
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Presence::is_present)
    }
}

/// A fact field whose JSON type is not trusted.
///
/// Any JSON value is accepted and shown as text: strings verbatim, numbers
/// in their JSON form, everything else as JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Fact(pub Value);

impl Presence for Fact {
    fn is_present(&self) -> bool {
        self.0.is_present()
    }
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            other => write!(f, "{other}"),
        }
    }
}

impl From<&str> for Fact {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }
}

/// Chat backend response payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlaceCard {
    /// Free-text answer from the tour guide.
    pub answer: String,
    /// Structured facts about the queried place.
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_data: SourceData,
}

/// Structured facts about the queried place. Every field is optional.
///
/// Coordinates must be numeric since they are plotted; the other scalar
/// facts accept any JSON type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceData {
    pub lat: Option<Number>,
    pub lon: Option<Number>,
    pub population: Option<Fact>,
    pub region: Option<Fact>,
    pub timezone: Option<Fact>,
    pub display_name: Option<Fact>,
    /// Names of cities within roughly 100 km.
    #[serde(deserialize_with = "null_as_default")]
    pub nearby: Vec<String>,
    /// Nearby cities with coordinates; anything other than a JSON array is
    /// read as empty.
    #[serde(deserialize_with = "array_or_empty")]
    pub nearby_data: Vec<NearbyPlace>,
}

impl SourceData {
    /// Both coordinates of the main location are present.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.lat.is_present() && self.lon.is_present()
    }
}

/// A nearby city entry from `nearby_data`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NearbyPlace {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lat: Option<Number>,
    #[serde(default)]
    pub lon: Option<Number>,
}

impl NearbyPlace {
    /// Both coordinates are present, so the entry can be plotted.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.lat.is_present() && self.lon.is_present()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn array_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        items @ Value::Array(_) => serde_json::from_value(items).map_err(serde::de::Error::custom),
        _ => Ok(Vec::new()),
    }
}
