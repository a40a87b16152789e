use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use super::error::{Result, SearchError};
use crate::search::phases::ScoreWeights;


pub const ENV_PREFIX: &str = "LISTING_SEARCH";

pub const CONFIG_PATH_ENV: &str = "LISTING_SEARCH_CONFIG";

pub const DEFAULT_CONFIG_FILE: &str = "listing-search.toml";


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,

    pub catalog_base_url: String,
    pub catalog_api_key: Option<String>,
    pub catalog_table: String,
    pub catalog_timeout_secs: u64,

    /// Upper bound on records requested from the catalog per search.
    pub candidate_limit: usize,
    /// Upper bound on ranked results returned to the caller.
    pub result_cap: usize,
    pub related_queries_cap: usize,

    pub score_weights: ScoreWeights,

    /// Replaces the embedded keyword/typo tables when set.
    pub tables_path: Option<PathBuf>,
    /// Serve from a JSON array of records instead of the hosted catalog.
    pub fixtures_path: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,

            catalog_base_url: "http://localhost:54321".to_string(),
            catalog_api_key: None,
            catalog_table: "businesses".to_string(),
            catalog_timeout_secs: 10,

            candidate_limit: 50,
            result_cap: 20,
            related_queries_cap: 4,

            score_weights: ScoreWeights::default(),

            tables_path: None,
            fixtures_path: None,
        }
    }
}

impl ServiceConfig {
    /// Defaults, then the config file (if any), then `LISTING_SEARCH_*` variables.
    /// Nested keys use `__`, e.g. `LISTING_SEARCH_SCORE_WEIGHTS__AI_MATCH`.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .ok()
            .or_else(|| {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.exists().then_some(local)
            });

        Self::load_from(path.as_deref())
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::finish(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!("Configuration loaded: {:?}", config.redacted());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(SearchError::config("port must be non-zero"));
        }
        if self.candidate_limit == 0 || self.result_cap == 0 || self.related_queries_cap == 0 {
            return Err(SearchError::config("limits and caps must be non-zero"));
        }
        if self.catalog_table.trim().is_empty() {
            return Err(SearchError::config("catalog_table must not be empty"));
        }
        Url::parse(&self.catalog_base_url).map_err(|e| {
            SearchError::config(format!("invalid catalog_base_url '{}': {}", self.catalog_base_url, e))
        })?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.catalog_api_key.is_some() {
            copy.catalog_api_key = Some("***".to_string());
        }
        copy
    }
}
