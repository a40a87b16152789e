use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use super::store::{BusinessRecord, CandidateQuery, CatalogError, CatalogStore, SEARCH_FIELDS};
use crate::core::config::ServiceConfig;
use crate::utils::safe_truncate_ellipsis;


const MAX_ERROR_BODY_CHARS: usize = 300;


/// Catalog backed by a PostgREST-style hosted database.
///
/// One GET per search, no retries: a failure surfaces to the caller.
pub struct RestCatalog {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl RestCatalog {
    pub fn new(
        base_url: &str,
        table: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let base = Url::parse(base_url)
            .map_err(|e| CatalogError::Unavailable(format!("invalid base url '{}': {}", base_url, e)))?;
        let endpoint = base
            .join(&format!("rest/v1/{}", table))
            .map_err(|e| CatalogError::Unavailable(format!("invalid table '{}': {}", table, e)))?;

        let client = Client::builder().timeout(timeout).build()?;

        info!("RestCatalog created for {}", endpoint);

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, CatalogError> {
        Self::new(
            &config.catalog_base_url,
            &config.catalog_table,
            config.catalog_api_key.clone(),
            Duration::from_secs(config.catalog_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_request(&self, query: &CandidateQuery) -> Result<reqwest::Request, CatalogError> {
        let mut params: Vec<(&str, String)> = vec![
            ("select", "*".to_string()),
            ("verified", "eq.true".to_string()),
        ];
        if query.require_ai_enabled {
            params.push(("ai_enabled", "eq.true".to_string()));
        }
        params.push(("or", or_filter(&query.patterns)));
        params.push(("limit", query.limit.to_string()));

        let mut request = self.client.get(self.endpoint.clone()).query(&params);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }
        Ok(request.build()?)
    }
}

#[async_trait]
impl CatalogStore for RestCatalog {
    async fn search_candidates(
        &self,
        query: &CandidateQuery,
    ) -> Result<Vec<BusinessRecord>, CatalogError> {
        if query.patterns.is_empty() {
            return Ok(Vec::new());
        }

        let request = self.build_request(query)?;
        debug!(
            "Catalog request: {} patterns, ai_only={}, limit={}",
            query.patterns.len(),
            query.require_ai_enabled,
            query.limit
        );

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Catalog returned {}", status);
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: safe_truncate_ellipsis(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let bytes = response.bytes().await?;
        let records: Vec<BusinessRecord> =
            serde_json::from_slice(&bytes).map_err(|e| CatalogError::Decode(e.to_string()))?;

        debug!("Catalog returned {} records", records.len());
        Ok(records)
    }

    fn store_name(&self) -> &str {
        "rest"
    }
}


/// `(name.ilike."*p*",description.ilike."*p*",...)` for every pattern.
///
/// Values are double-quoted so commas and parentheses in user text stay literal.
/// `*` is a wildcard to PostgREST and is stripped; `%` and `_` are LIKE-escaped.
pub fn or_filter(patterns: &[String]) -> String {
    let clauses: Vec<String> = patterns
        .iter()
        .map(|p| quote_value(&like_escape(&p.replace('*', ""))))
        .flat_map(|value| {
            SEARCH_FIELDS
                .iter()
                .map(move |field| format!("{}.ilike.\"*{}*\"", field, value))
        })
        .collect();

    format!("({})", clauses.join(","))
}

fn like_escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn quote_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(api_key: Option<&str>) -> RestCatalog {
        RestCatalog::new(
            "https://db.example.com/",
            "businesses",
            api_key.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn query_pairs(request: &reqwest::Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_or_filter_covers_all_fields() {
        let filter = or_filter(&["pizza".to_string()]);
        assert_eq!(
            filter,
            "(name.ilike.\"*pizza*\",description.ilike.\"*pizza*\",short_description.ilike.\"*pizza*\",\
category.ilike.\"*pizza*\",tagline.ilike.\"*pizza*\",business_type.ilike.\"*pizza*\")"
        );
    }

    #[test]
    fn test_or_filter_escapes_values() {
        let filter = or_filter(&["a\"b,(c)*".to_string()]);
        assert!(filter.contains("name.ilike.\"*a\\\"b,(c)*\""));
    }

    #[test]
    fn test_or_filter_escapes_like_wildcards() {
        // `a_b%c` reaches Postgres as `a\_b\%c` once PostgREST unquotes it.
        let filter = or_filter(&["a_b%c".to_string()]);
        assert!(filter.contains("name.ilike.\"*a\\\\_b\\\\%c*\""));
        assert!(!filter.contains("*a_b"));

        let backslash = or_filter(&["c:\\dir".to_string()]);
        assert!(backslash.contains("name.ilike.\"*c:\\\\\\\\dir*\""));
    }

    #[test]
    fn test_endpoint_joins_table() {
        assert_eq!(
            catalog(None).endpoint().as_str(),
            "https://db.example.com/rest/v1/businesses"
        );
    }

    #[test]
    fn test_request_filters_verified_and_limit() {
        let query = CandidateQuery {
            patterns: vec!["gym".to_string()],
            require_ai_enabled: false,
            limit: 50,
        };
        let request = catalog(Some("key")).build_request(&query).unwrap();
        let pairs = query_pairs(&request);

        assert!(pairs.contains(&("verified".to_string(), "eq.true".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "50".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "ai_enabled"));
        assert_eq!(request.headers()["apikey"], "key");
        assert_eq!(request.headers()["authorization"], "Bearer key");
    }

    #[test]
    fn test_request_adds_ai_filter() {
        let query = CandidateQuery {
            patterns: vec!["gym".to_string()],
            require_ai_enabled: true,
            limit: 50,
        };
        let request = catalog(None).build_request(&query).unwrap();
        let pairs = query_pairs(&request);

        assert!(pairs.contains(&("ai_enabled".to_string(), "eq.true".to_string())));
        assert!(request.headers().get("apikey").is_none());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(RestCatalog::new("nope", "businesses", None, Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_empty_patterns_skip_request() {
        let query = CandidateQuery {
            patterns: Vec::new(),
            require_ai_enabled: false,
            limit: 50,
        };
        let records = catalog(None).search_candidates(&query).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_store_is_an_error() {
        let catalog =
            RestCatalog::new("http://127.0.0.1:1/", "businesses", None, Duration::from_secs(2))
                .unwrap();
        let query = CandidateQuery {
            patterns: vec!["gym".to_string()],
            require_ai_enabled: false,
            limit: 50,
        };
        assert!(catalog.search_candidates(&query).await.is_err());
    }
}
