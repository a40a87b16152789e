use chrono::NaiveTime;
use serde::Serialize;

use super::query_processor::SearchIntent;
use crate::db::{BusinessRecord, OpeningHours};


pub const FALLBACK_CATEGORY: &str = "Business";

pub const FAILURE_ERROR: &str = "Search failed";

pub const FAILURE_SUMMARY: &str = "Unable to process search at this time.";

pub const NO_QUERY_SUMMARY: &str = "Search verified businesses by name, service, or category.";


/// A candidate with its relevance score and presentation fields.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredResult {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    /// Listed category, else the business type, else [`FALLBACK_CATEGORY`].
    pub category: String,
    pub tagline: Option<String>,
    pub business_type: Option<String>,
    pub verified: bool,
    pub ai_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    #[serde(rename = "matchScore")]
    pub match_score: u32,
    /// `None` when the listing publishes no hours.
    #[serde(rename = "isOpen")]
    pub is_open: Option<bool>,
    #[serde(skip)]
    pub listed_category: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ScoredResult {
    pub fn new(record: BusinessRecord, match_score: u32, now: NaiveTime) -> Self {
        let listed_category = record.category.filter(|c| !c.trim().is_empty());
        let category = listed_category
            .clone()
            .or_else(|| record.business_type.clone().filter(|t| !t.trim().is_empty()))
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());
        let is_open = record.opening_hours.map(|hours| hours.is_open_at(now));

        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            short_description: record.short_description,
            category,
            tagline: record.tagline,
            business_type: record.business_type,
            verified: record.verified,
            ai_enabled: record.ai_enabled,
            opening_hours: record.opening_hours,
            match_score,
            is_open,
            listed_category,
            extra: record.extra,
        }
    }
}


#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub businesses: Vec<ScoredResult>,
    /// The query exactly as received, surrounding whitespace included.
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<SearchIntent>,
    pub result_count: usize,
    pub ai_summary: String,
    pub related_queries: Vec<String>,
    pub suggestions: Vec<String>,
    /// Elapsed milliseconds, for display only.
    #[serde(rename = "searchTime")]
    pub search_time_ms: u64,
}

impl SearchResponse {
    pub fn no_query(suggestions: Vec<String>) -> Self {
        Self {
            businesses: Vec::new(),
            query: String::new(),
            corrected_query: None,
            intent: None,
            result_count: 0,
            ai_summary: NO_QUERY_SUMMARY.to_string(),
            related_queries: Vec::new(),
            suggestions,
            search_time_ms: 0,
        }
    }
}


/// Body returned with a 5xx when the pipeline cannot complete.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFailure {
    pub businesses: Vec<ScoredResult>,
    pub error: String,
    pub ai_summary: String,
    pub related_queries: Vec<String>,
    pub suggestions: Vec<String>,
    pub result_count: usize,
}

impl Default for SearchFailure {
    fn default() -> Self {
        Self {
            businesses: Vec::new(),
            error: FAILURE_ERROR.to_string(),
            ai_summary: FAILURE_SUMMARY.to_string(),
            related_queries: Vec::new(),
            suggestions: Vec::new(),
            result_count: 0,
        }
    }
}
