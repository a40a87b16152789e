use regex::{NoExpand, Regex, RegexBuilder};
use tracing::debug;

use crate::core::error::{Result, SearchError};
use crate::core::tables::TypoEntry;


struct TypoRule {
    misspelling: String,
    pattern: Regex,
    correction: String,
}


/// Rewrites known misspellings, applying the table top to bottom.
pub struct TypoCorrector {
    rules: Vec<TypoRule>,
}

impl TypoCorrector {
    pub fn new(typos: &[TypoEntry]) -> Result<Self> {
        let rules = typos
            .iter()
            .map(|entry| {
                let pattern = RegexBuilder::new(&regex::escape(&entry.misspelling))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        SearchError::tables(format!("bad misspelling '{}': {}", entry.misspelling, e))
                    })?;
                Ok(TypoRule {
                    misspelling: entry.misspelling.to_lowercase(),
                    pattern,
                    correction: entry.correction.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    pub fn correct(&self, query: &str) -> String {
        let query_lower = query.to_lowercase();
        let mut corrected = query.to_string();

        for rule in &self.rules {
            if query_lower.contains(&rule.misspelling) {
                corrected = rule
                    .pattern
                    .replace_all(&corrected, NoExpand(&rule.correction))
                    .into_owned();
                debug!("Corrected '{}' -> '{}'", rule.misspelling, rule.correction);
            }
        }

        corrected
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
