use async_trait::async_trait;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Record fields the catalog matches query patterns against.
pub const SEARCH_FIELDS: [&str; 6] = [
    "name",
    "description",
    "short_description",
    "category",
    "tagline",
    "business_type",
];


#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Catalog returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Catalog response could not be decoded: {0}")]
    Decode(String),
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
    #[error("Fixture IO error: {0}")]
    Io(#[from] std::io::Error),
}


/// Daily opening window in UTC. `close` before `open` means the window crosses midnight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpeningHours {
    #[serde(with = "hhmm")]
    pub open: NaiveTime,
    #[serde(with = "hhmm")]
    pub close: NaiveTime,
}

impl OpeningHours {
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        if self.open == self.close {
            return true;
        }
        if self.open < self.close {
            time >= self.open && time < self.close
        } else {
            time >= self.open || time < self.close
        }
    }
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

fn string_or_number<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("unsupported id: {other}"))),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}


/// A listing as stored by the catalog. Read-only here; absent text fields are `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BusinessRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ai_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    /// Any other columns (phone, logo, plan...), passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BusinessRecord {
    pub fn field(&self, name: &str) -> &str {
        match name {
            "name" => &self.name,
            "description" => self.description.as_deref().unwrap_or(""),
            "short_description" => self.short_description.as_deref().unwrap_or(""),
            "category" => self.category.as_deref().unwrap_or(""),
            "tagline" => self.tagline.as_deref().unwrap_or(""),
            "business_type" => self.business_type.as_deref().unwrap_or(""),
            _ => "",
        }
    }

    /// Case-insensitive substring match of `pattern_lower` against any searchable field.
    pub fn matches_pattern(&self, pattern_lower: &str) -> bool {
        SEARCH_FIELDS
            .iter()
            .any(|field| self.field(field).to_lowercase().contains(pattern_lower))
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    /// OR-combined substring patterns, in build order, de-duplicated.
    pub patterns: Vec<String>,
    pub require_ai_enabled: bool,
    pub limit: usize,
}


/// Read-only access to verified listings.
///
/// Implementations return at most `query.limit` records with `verified = true`
/// that match any pattern on any of [`SEARCH_FIELDS`]. Order is unspecified.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn search_candidates(
        &self,
        query: &CandidateQuery,
    ) -> Result<Vec<BusinessRecord>, CatalogError>;

    fn store_name(&self) -> &str;
}
