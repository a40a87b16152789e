use std::collections::HashSet;
use std::path::Path;

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{Result, SearchError};
use crate::search::query_processor::BusinessType;


pub const DEFAULT_TABLES: &str = include_str!("../../config/search_tables.toml");


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypoEntry {
    pub misspelling: String,
    pub correction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusinessTypeEntry {
    pub business_type: BusinessType,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryEntry {
    pub category: String,
    pub keywords: Vec<String>,
}

/// Phrases that switch on each intent flag when found anywhere in the query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FlagPhrases {
    pub near_me: Vec<String>,
    pub ai: Vec<String>,
    pub verified_only: Vec<String>,
    pub open_now: Vec<String>,
}

/// Ordered lookup tables driving typo correction and intent classification.
///
/// Every list keeps declaration order: typos are applied in that order and
/// business types and categories resolve first-match-wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchTables {
    pub typos: Vec<TypoEntry>,
    pub business_types: Vec<BusinessTypeEntry>,
    pub categories: Vec<CategoryEntry>,
    pub flags: FlagPhrases,
    pub no_query_suggestions: Vec<String>,
}

impl SearchTables {
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_TABLES)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading search tables from {}", path.display());
        let raw = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()
            .map_err(|e| SearchError::tables(e.to_string()))?;
        Self::from_config(raw)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let raw = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| SearchError::tables(e.to_string()))?;
        Self::from_config(raw)
    }

    /// Loads `path` when given, the embedded defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    fn from_config(raw: Config) -> Result<Self> {
        let tables: Self = raw
            .try_deserialize()
            .map_err(|e| SearchError::tables(e.to_string()))?;
        let tables = tables.normalized();
        tables.validate()?;
        debug!(
            "Search tables ready: {} typos, {} business types, {} categories",
            tables.typos.len(),
            tables.business_types.len(),
            tables.categories.len()
        );
        Ok(tables)
    }

    // Matching runs against lower-cased query text.
    fn normalized(mut self) -> Self {
        for typo in &mut self.typos {
            typo.misspelling = typo.misspelling.to_lowercase();
        }
        for entry in &mut self.business_types {
            lowercase_all(&mut entry.keywords);
        }
        for entry in &mut self.categories {
            lowercase_all(&mut entry.keywords);
        }
        lowercase_all(&mut self.flags.near_me);
        lowercase_all(&mut self.flags.ai);
        lowercase_all(&mut self.flags.verified_only);
        lowercase_all(&mut self.flags.open_now);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for typo in &self.typos {
            if typo.misspelling.trim().is_empty() || typo.correction.trim().is_empty() {
                return Err(SearchError::tables("typo entries need a misspelling and a correction"));
            }
            if !seen.insert(typo.misspelling.as_str()) {
                return Err(SearchError::tables(format!(
                    "duplicate misspelling '{}'",
                    typo.misspelling
                )));
            }
        }

        // A correction containing a misspelling would be rewritten again on a second pass.
        for typo in &self.typos {
            let correction = typo.correction.to_lowercase();
            if let Some(other) = self
                .typos
                .iter()
                .find(|other| correction.contains(&other.misspelling))
            {
                return Err(SearchError::tables(format!(
                    "correction '{}' contains misspelling '{}'",
                    typo.correction, other.misspelling
                )));
            }
            // The reverse lets a replacement join surrounding text into a fresh misspelling.
            if let Some(other) = self
                .typos
                .iter()
                .find(|other| other.misspelling.contains(&correction))
            {
                return Err(SearchError::tables(format!(
                    "misspelling '{}' contains correction '{}'",
                    other.misspelling, typo.correction
                )));
            }
        }

        for entry in &self.business_types {
            if has_blank(&entry.keywords) {
                return Err(SearchError::tables(format!(
                    "business type '{}' needs non-empty keywords",
                    entry.business_type
                )));
            }
        }
        for entry in &self.categories {
            if has_blank(&entry.keywords) {
                return Err(SearchError::tables(format!(
                    "category '{}' needs non-empty keywords",
                    entry.category
                )));
            }
        }

        if self.no_query_suggestions.is_empty() {
            return Err(SearchError::tables("no_query_suggestions must not be empty"));
        }
        Ok(())
    }
}

fn lowercase_all(words: &mut [String]) {
    for word in words.iter_mut() {
        *word = word.to_lowercase();
    }
}

fn has_blank(keywords: &[String]) -> bool {
    keywords.is_empty() || keywords.iter().any(|k| k.trim().is_empty())
}
