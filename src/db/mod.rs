

pub mod client;
pub mod memory;
pub mod store;

pub use client::RestCatalog;
pub use memory::InMemoryCatalog;
pub use store::{BusinessRecord, CandidateQuery, CatalogError, CatalogStore, OpeningHours, SEARCH_FIELDS};
