

pub mod core;
pub mod db;
pub mod http;
pub mod search;
pub mod utils;

pub use utils::safe_truncate;


pub use crate::core::config::ServiceConfig;
pub use crate::core::error::{Result, SearchError};
pub use crate::core::tables::SearchTables;
pub use db::{CatalogStore, InMemoryCatalog, RestCatalog};
pub use search::{SearchEngine, SearchLimits, SearchResponse};
