

pub mod engine;
pub mod models;
pub mod phases;
pub mod query_processor;

pub use engine::{SearchEngine, SearchLimits};
pub use models::{ScoredResult, SearchFailure, SearchResponse};
pub use query_processor::{BusinessType, ProcessedQuery, QueryProcessor, SearchIntent};
