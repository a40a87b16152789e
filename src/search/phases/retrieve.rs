use tracing::{debug, warn};

use crate::db::{BusinessRecord, CandidateQuery, CatalogError, CatalogStore};
use crate::search::query_processor::ProcessedQuery;


/// Raw query, correction, terms and category keywords as one OR-ed pattern list.
pub fn build_candidate_query(processed: &ProcessedQuery, limit: usize) -> CandidateQuery {
    let mut patterns: Vec<String> = Vec::new();

    let mut push = |pattern: &str| {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return;
        }
        let lower = pattern.to_lowercase();
        if !patterns.iter().any(|p| p.to_lowercase() == lower) {
            patterns.push(pattern.to_string());
        }
    };

    push(&processed.original_query);
    if let Some(corrected) = processed.correction() {
        push(corrected);
    }
    for term in &processed.intent.search_terms {
        push(term);
    }
    for keyword in &processed.intent.category_keywords {
        push(keyword);
    }

    CandidateQuery {
        patterns,
        require_ai_enabled: processed.intent.wants_ai,
        limit,
    }
}


pub async fn retrieve_candidates(
    store: &dyn CatalogStore,
    processed: &ProcessedQuery,
    limit: usize,
) -> Result<Vec<BusinessRecord>, CatalogError> {
    let query = build_candidate_query(processed, limit);
    let records = store.search_candidates(&query).await?;

    let total = records.len();
    let mut verified: Vec<BusinessRecord> = records.into_iter().filter(|r| r.verified).collect();
    if verified.len() < total {
        warn!(
            "Store '{}' returned {} unverified records; dropped",
            store.store_name(),
            total - verified.len()
        );
    }
    verified.truncate(limit);

    debug!("Retrieved {} candidates from '{}'", verified.len(), store.store_name());
    Ok(verified)
}
