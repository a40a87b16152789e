use crate::search::models::{ScoredResult, SearchResponse};
use crate::search::query_processor::ProcessedQuery;


const MAX_CATEGORY_RELATED: usize = 2;


pub fn compose_response(
    processed: &ProcessedQuery,
    ranked: Vec<ScoredResult>,
    related_cap: usize,
    search_time_ms: u64,
) -> SearchResponse {
    let query = processed.original_query.as_str();
    let correction = processed.correction();
    let display_query = processed.display_query();

    let ai_summary = summarize(query, correction, &ranked);
    let related_queries = related_queries(query, display_query, &ranked, related_cap);
    let suggestions = suggestions(display_query);

    SearchResponse {
        result_count: ranked.len(),
        businesses: ranked,
        query: query.to_string(),
        corrected_query: correction.map(str::to_string),
        intent: Some(processed.intent.clone()),
        ai_summary,
        related_queries,
        suggestions,
        search_time_ms,
    }
}


/// Plain-text summary from fixed templates.
pub fn summarize(query: &str, correction: Option<&str>, ranked: &[ScoredResult]) -> String {
    if ranked.is_empty() {
        let mut summary = format!("No verified businesses found for \"{}\".", query);
        if let Some(corrected) = correction {
            summary.push_str(&format!(" (Did you mean \"{}\"?)", corrected));
        }
        summary.push_str(" Try different keywords or browse our categories.");
        return summary;
    }

    let count = ranked.len();
    let mut summary = match correction {
        Some(corrected) => format!(
            "Showing results for \"{}\" ({} verified businesses found)",
            corrected, count
        ),
        None => format!("Found {} verified businesses matching \"{}\".", count, query),
    };

    let with_ai = ranked.iter().filter(|r| r.ai_enabled).count();
    if with_ai > 0 {
        summary.push_str(&format!(" {} have AI assistants available.", with_ai));
    }

    summary
}


/// Up to two result categories, then templated variants of `display_query`.
pub fn related_queries(
    query: &str,
    display_query: &str,
    ranked: &[ScoredResult],
    cap: usize,
) -> Vec<String> {
    let mut related: Vec<String> = Vec::new();

    for category in ranked.iter().filter_map(|r| r.listed_category.as_deref()) {
        if related.len() >= MAX_CATEGORY_RELATED {
            break;
        }
        let category_lower = category.to_lowercase();
        if category_lower == query.to_lowercase() || category_lower == display_query.to_lowercase() {
            continue;
        }
        push_distinct(&mut related, category);
    }

    for variant in [
        format!("{} near me", display_query),
        format!("best {}", display_query),
        format!("{} with AI assistant", display_query),
    ] {
        push_distinct(&mut related, &variant);
    }

    related.truncate(cap);
    related
}


pub fn suggestions(display_query: &str) -> Vec<String> {
    vec![
        format!("{} near me", display_query),
        format!("best {}", display_query),
        format!("{} services", display_query),
        format!("{} reviews", display_query),
    ]
}

fn push_distinct(list: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}
