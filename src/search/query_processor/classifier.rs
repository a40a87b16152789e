use std::sync::Arc;

use tracing::debug;

use super::models::SearchIntent;
use crate::core::tables::SearchTables;


pub const MIN_TERM_CHARS: usize = 3;


pub struct IntentClassifier {
    tables: Arc<SearchTables>,
}

impl IntentClassifier {
    pub fn new(tables: Arc<SearchTables>) -> Self {
        Self { tables }
    }

    pub fn classify(&self, corrected: &str) -> SearchIntent {
        let query_lower = corrected.to_lowercase();
        let mut intent = SearchIntent {
            corrected_text: corrected.to_string(),
            ..Default::default()
        };

        // First business type with a matching keyword wins and donates its whole list.
        if let Some(entry) = self
            .tables
            .business_types
            .iter()
            .find(|entry| contains_any(&query_lower, &entry.keywords))
        {
            intent.business_type = Some(entry.business_type);
            intent.category_keywords.extend(entry.keywords.iter().cloned());
        }

        if let Some(entry) = self
            .tables
            .categories
            .iter()
            .find(|entry| contains_any(&query_lower, &entry.keywords))
        {
            debug!("Query matched category '{}'", entry.category);
            intent.category_keywords.extend(entry.keywords.iter().cloned());
        }

        intent.search_terms = tokenize(&query_lower);

        let flags = &self.tables.flags;
        intent.wants_near_me = contains_any(&query_lower, &flags.near_me);
        intent.wants_ai = contains_any(&query_lower, &flags.ai);
        intent.wants_verified_only = contains_any(&query_lower, &flags.verified_only);
        intent.wants_open_now = contains_any(&query_lower, &flags.open_now);

        intent
    }
}


pub fn tokenize(query_lower: &str) -> Vec<String> {
    query_lower
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TERM_CHARS)
        .map(str::to_string)
        .collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}
