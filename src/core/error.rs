

use thiserror::Error;

use crate::db::CatalogError;


#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Search tables error: {0}")]
    Tables(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SearchError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn tables(message: impl Into<String>) -> Self {
        Self::Tables(message.into())
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}


pub type Result<T> = std::result::Result<T, SearchError>;
