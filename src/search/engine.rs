use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::models::{ScoredResult, SearchResponse};
use super::phases::{ScoreWeights, compose_response, rank_results, retrieve_candidates, score};
use super::query_processor::QueryProcessor;
use crate::core::config::ServiceConfig;
use crate::core::error::Result;
use crate::core::tables::SearchTables;
use crate::db::CatalogStore;
use crate::utils::safe_truncate;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub candidate_limit: usize,
    pub result_cap: usize,
    pub related_queries_cap: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            candidate_limit: 50,
            result_cap: 20,
            related_queries_cap: 4,
        }
    }
}

impl From<&ServiceConfig> for SearchLimits {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            candidate_limit: config.candidate_limit,
            result_cap: config.result_cap,
            related_queries_cap: config.related_queries_cap,
        }
    }
}


/// Stateless per request: correct, classify, retrieve, score, rank, compose.
pub struct SearchEngine {
    store: Arc<dyn CatalogStore>,
    processor: QueryProcessor,
    tables: Arc<SearchTables>,
    weights: ScoreWeights,
    limits: SearchLimits,
}

impl SearchEngine {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        tables: Arc<SearchTables>,
        limits: SearchLimits,
    ) -> Result<Self> {
        Ok(Self {
            store,
            processor: QueryProcessor::new(Arc::clone(&tables))?,
            tables,
            weights: ScoreWeights::default(),
            limits,
        })
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    pub async fn search(&self, query: Option<&str>) -> Result<SearchResponse> {
        self.search_at(query, Utc::now()).await
    }

    /// Same as [`search`](Self::search) with an explicit clock for opening-hours checks.
    pub async fn search_at(&self, query: Option<&str>, now: DateTime<Utc>) -> Result<SearchResponse> {
        let started = Instant::now();

        let Some(raw) = query.filter(|q| !q.trim().is_empty()) else {
            debug!("Empty query, returning static suggestions");
            return Ok(self.no_query_response());
        };

        let query = raw.trim();
        let processed = self.processor.process(query);
        let candidates =
            retrieve_candidates(self.store.as_ref(), &processed, self.limits.candidate_limit).await?;

        let time_of_day = now.time();
        let scored: Vec<ScoredResult> = candidates
            .into_iter()
            .map(|record| {
                let match_score = score(
                    &record,
                    &processed.original_query,
                    &processed.corrected_query,
                    &processed.intent,
                    &self.weights,
                );
                ScoredResult::new(record, match_score, time_of_day)
            })
            .collect();
        let candidate_count = scored.len();

        let ranked = rank_results(scored, self.limits.result_cap);
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            "🔍 '{}' -> {} of {} candidates ranked in {}ms",
            safe_truncate(query, 50),
            ranked.len(),
            candidate_count,
            elapsed_ms
        );

        let mut response = compose_response(
            &processed,
            ranked,
            self.limits.related_queries_cap,
            elapsed_ms,
        );
        response.query = raw.to_string();
        Ok(response)
    }

    pub fn no_query_response(&self) -> SearchResponse {
        SearchResponse::no_query(self.tables.no_query_suggestions.clone())
    }
}
