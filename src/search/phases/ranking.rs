use crate::search::models::ScoredResult;


/// Drops zero scores, orders by score descending, keeps the first `cap`.
///
/// `sort_by` is stable: equal scores keep retrieval order.
pub fn rank_results(mut scored: Vec<ScoredResult>, cap: usize) -> Vec<ScoredResult> {
    scored.retain(|r| r.match_score > 0);
    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored.truncate(cap);
    scored
}
