pub mod classifier;
pub mod corrector;
pub mod models;
pub mod processor;

pub use classifier::{IntentClassifier, tokenize};
pub use corrector::TypoCorrector;
pub use models::{BusinessType, ProcessedQuery, SearchIntent};
pub use processor::QueryProcessor;
