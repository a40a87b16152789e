use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};


#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BusinessType {
    Restaurant,
    Service,
    Healthcare,
    Store,
    Professional,
}


/// Structured reading of one query. Built once per request, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchIntent {
    pub business_type: Option<BusinessType>,
    pub category_keywords: Vec<String>,
    pub search_terms: Vec<String>,
    pub wants_near_me: bool,
    #[serde(rename = "wantsAI")]
    pub wants_ai: bool,
    pub wants_verified_only: bool,
    pub wants_open_now: bool,
    pub corrected_text: String,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedQuery {
    pub original_query: String,
    pub corrected_query: String,
    pub intent: SearchIntent,
}

impl ProcessedQuery {
    /// The corrected text, only when it differs from what the user typed.
    pub fn correction(&self) -> Option<&str> {
        (self.corrected_query != self.original_query).then_some(self.corrected_query.as_str())
    }

    /// Text used for templated suggestions: the correction if any, else the raw query.
    pub fn display_query(&self) -> &str {
        self.correction().unwrap_or(&self.original_query)
    }
}
