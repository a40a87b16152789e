use std::sync::Arc;

use tracing::debug;

use super::classifier::IntentClassifier;
use super::corrector::TypoCorrector;
use super::models::ProcessedQuery;
use crate::core::error::Result;
use crate::core::tables::SearchTables;


/// Typo correction followed by intent classification.
pub struct QueryProcessor {
    corrector: TypoCorrector,
    classifier: IntentClassifier,
}

impl QueryProcessor {
    pub fn new(tables: Arc<SearchTables>) -> Result<Self> {
        Ok(Self {
            corrector: TypoCorrector::new(&tables.typos)?,
            classifier: IntentClassifier::new(tables),
        })
    }

    pub fn process(&self, query: &str) -> ProcessedQuery {
        let corrected_query = self.corrector.correct(query);
        let intent = self.classifier.classify(&corrected_query);

        debug!(
            "Processed query: type={:?}, {} terms, {} category keywords, ai={}",
            intent.business_type,
            intent.search_terms.len(),
            intent.category_keywords.len(),
            intent.wants_ai
        );

        ProcessedQuery {
            original_query: query.to_string(),
            corrected_query,
            intent,
        }
    }
}
