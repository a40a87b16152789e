use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use super::store::{BusinessRecord, CandidateQuery, CatalogError, CatalogStore};


/// Catalog held in memory, matching with the same predicates as the hosted store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: Vec<BusinessRecord>,
}

impl InMemoryCatalog {
    pub fn new(records: Vec<BusinessRecord>) -> Self {
        Self { records }
    }

    /// Loads a JSON array of records.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let records: Vec<BusinessRecord> =
            serde_json::from_str(&raw).map_err(|e| CatalogError::Decode(e.to_string()))?;
        info!("Loaded {} fixture records from {}", records.len(), path.display());
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn search_candidates(
        &self,
        query: &CandidateQuery,
    ) -> Result<Vec<BusinessRecord>, CatalogError> {
        let patterns: Vec<String> = query.patterns.iter().map(|p| p.to_lowercase()).collect();

        Ok(self
            .records
            .iter()
            .filter(|r| r.verified)
            .filter(|r| !query.require_ai_enabled || r.ai_enabled)
            .filter(|r| patterns.iter().any(|p| r.matches_pattern(p)))
            .take(query.limit)
            .cloned()
            .collect())
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, verified: bool, ai_enabled: bool) -> BusinessRecord {
        BusinessRecord {
            id: id.to_string(),
            name: name.to_string(),
            verified,
            ai_enabled,
            ..Default::default()
        }
    }

    fn query(patterns: &[&str], require_ai_enabled: bool, limit: usize) -> CandidateQuery {
        CandidateQuery {
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            require_ai_enabled,
            limit,
        }
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            record("1", "Gym One", true, false),
            record("2", "Gym Two", false, true),
            record("3", "Gym Three", true, true),
            record("4", "Pizza Place", true, true),
        ])
    }

    #[tokio::test]
    async fn test_only_verified_records() {
        let found = catalog().search_candidates(&query(&["GYM"], false, 50)).await.unwrap();
        let ids: Vec<&str> = found.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_ai_filter_applies_before_limit() {
        let found = catalog().search_candidates(&query(&["gym"], true, 1)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "3");
    }

    #[tokio::test]
    async fn test_patterns_are_or_combined() {
        let found = catalog()
            .search_candidates(&query(&["pizza", "one"], false, 50))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = catalog();
        let found =
            tokio_test::block_on(catalog.search_candidates(&query(&["dentist"], false, 50))).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_missing_fixture_file() {
        let err = InMemoryCatalog::from_json_file(Path::new("/nonexistent/fixtures.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
