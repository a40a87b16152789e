

pub mod compose;
pub mod ranking;
pub mod retrieve;
pub mod scoring;

pub use compose::{compose_response, related_queries, suggestions, summarize};
pub use ranking::rank_results;
pub use retrieve::{build_candidate_query, retrieve_candidates};
pub use scoring::{ScoreWeights, haystack, score};
