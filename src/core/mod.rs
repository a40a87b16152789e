

pub mod config;
pub mod error;
pub mod tables;

pub use self::config::ServiceConfig;
pub use self::error::{Result, SearchError};
pub use self::tables::{BusinessTypeEntry, CategoryEntry, FlagPhrases, SearchTables, TypoEntry};
