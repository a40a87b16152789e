use serde::{Deserialize, Serialize};

use crate::db::BusinessRecord;
use crate::search::query_processor::SearchIntent;


/// Points per matching rule. Overridable from the `[score_weights]` config table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScoreWeights {
    pub exact_query: u32,
    pub corrected_query: u32,
    pub search_term: u32,
    pub category_keyword: u32,
    pub name_match: u32,
    pub ai_match: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            exact_query: 100,
            corrected_query: 90,
            search_term: 30,
            category_keyword: 50,
            name_match: 75,
            ai_match: 15,
        }
    }
}


/// Lower-cased name, description, category and business type joined with spaces.
pub fn haystack(
    name: &str,
    description: Option<&str>,
    category: Option<&str>,
    business_type: Option<&str>,
) -> String {
    [
        name,
        description.unwrap_or(""),
        category.unwrap_or(""),
        business_type.unwrap_or(""),
    ]
    .join(" ")
    .to_lowercase()
}


/// Additive relevance score. Pure: every candidate gets a score, zero included.
///
/// Terms and keywords count once per list entry, so a repeated term scores twice.
pub fn score(
    candidate: &BusinessRecord,
    query: &str,
    corrected_query: &str,
    intent: &SearchIntent,
    weights: &ScoreWeights,
) -> u32 {
    let haystack = haystack(
        &candidate.name,
        candidate.description.as_deref(),
        candidate.category.as_deref(),
        candidate.business_type.as_deref(),
    );
    let query_lower = query.to_lowercase();
    let mut total = 0;

    if haystack.contains(&query_lower) {
        total += weights.exact_query;
    }

    if corrected_query != query && haystack.contains(&corrected_query.to_lowercase()) {
        total += weights.corrected_query;
    }

    for term in &intent.search_terms {
        if haystack.contains(term.as_str()) {
            total += weights.search_term;
        }
    }

    for keyword in &intent.category_keywords {
        if haystack.contains(keyword.as_str()) {
            total += weights.category_keyword;
        }
    }

    if candidate.name.to_lowercase().contains(&query_lower) {
        total += weights.name_match;
    }

    if candidate.ai_enabled && intent.wants_ai {
        total += weights.ai_match;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, description: &str) -> BusinessRecord {
        BusinessRecord {
            id: "1".to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            verified: true,
            ..Default::default()
        }
    }

    fn intent(terms: &[&str], keywords: &[&str], wants_ai: bool) -> SearchIntent {
        SearchIntent {
            search_terms: terms.iter().map(|s| s.to_string()).collect(),
            category_keywords: keywords.iter().map(|s| s.to_string()).collect(),
            wants_ai,
            ..Default::default()
        }
    }

    #[test]
    fn test_haystack_tolerates_missing_fields() {
        assert_eq!(haystack("Joe's", None, Some("Cafe"), None), "joe's  cafe ");
    }

    #[test]
    fn test_exact_query_and_name_double_count() {
        let candidate = record("Pizza Palace", "Wood fired");
        let weights = ScoreWeights::default();
        // +100 haystack, +75 name, +30 term "pizza"
        assert_eq!(score(&candidate, "pizza", "pizza", &intent(&["pizza"], &[], false), &weights), 205);
    }

    #[test]
    fn test_query_in_description_only() {
        let candidate = record("Luigi's", "Best pizza in town");
        let weights = ScoreWeights::default();
        assert_eq!(score(&candidate, "pizza", "pizza", &intent(&[], &[], false), &weights), 100);
    }

    #[test]
    fn test_corrected_query_bonus_only_when_changed() {
        let candidate = record("Main Street Restaurant", "");
        let weights = ScoreWeights::default();
        let corrected = score(&candidate, "resturant", "restaurant", &intent(&[], &[], false), &weights);
        assert_eq!(corrected, 90);

        let unchanged = score(&candidate, "restaurant", "restaurant", &intent(&[], &[], false), &weights);
        assert_eq!(unchanged, 100 + 75);
    }

    #[test]
    fn test_repeated_terms_score_each_time() {
        let candidate = record("Gym", "");
        let weights = ScoreWeights::default();
        let once = score(&candidate, "zzz", "zzz", &intent(&["gym"], &[], false), &weights);
        let twice = score(&candidate, "zzz", "zzz", &intent(&["gym", "gym"], &[], false), &weights);
        assert_eq!(once, 30);
        assert_eq!(twice, 60);
    }

    #[test]
    fn test_category_keywords() {
        let candidate = record("Iron Temple", "Fitness and yoga classes");
        let weights = ScoreWeights::default();
        let keywords = ["gym", "fitness", "yoga"];
        assert_eq!(score(&candidate, "zzz", "zzz", &intent(&[], &keywords, false), &weights), 100);
    }

    #[test]
    fn test_ai_bonus_needs_both_sides() {
        let mut candidate = record("FitZone", "");
        let weights = ScoreWeights::default();
        assert_eq!(score(&candidate, "zzz", "zzz", &intent(&[], &[], true), &weights), 0);

        candidate.ai_enabled = true;
        assert_eq!(score(&candidate, "zzz", "zzz", &intent(&[], &[], true), &weights), 15);
        assert_eq!(score(&candidate, "zzz", "zzz", &intent(&[], &[], false), &weights), 0);
    }

    #[test]
    fn test_ai_gym_scenario() {
        let candidate = BusinessRecord {
            ai_enabled: true,
            ..record("FitZone Gym", "Fitness center with smart booking")
        };
        let keywords = ["gym", "fitness", "yoga", "personal trainer", "pilates", "crossfit"];
        let total = score(&candidate, "ai gym", "ai gym", &intent(&["gym"], &keywords, true), &ScoreWeights::default());
        assert!(total >= 115);
        assert_eq!(total, 30 + 50 + 50 + 15);
    }

    #[test]
    fn test_tagline_is_not_scored() {
        let candidate = BusinessRecord {
            tagline: Some("pizza".to_string()),
            ..record("Luigi's", "")
        };
        assert_eq!(score(&candidate, "pizza", "pizza", &intent(&[], &[], false), &ScoreWeights::default()), 0);
    }

    #[test]
    fn test_deterministic() {
        let candidate = record("Pizza Palace", "pizza and pasta");
        let i = intent(&["pizza"], &["pizza", "food"], false);
        let first = score(&candidate, "pizza", "pizza", &i, &ScoreWeights::default());
        for _ in 0..10 {
            assert_eq!(score(&candidate, "pizza", "pizza", &i, &ScoreWeights::default()), first);
        }
    }
}
