//! Relevance scoring between a query and a candidate record

use crate::models::FaqRecord;
use crate::search::normalize;
use std::collections::HashSet;

/// Score returned immediately for an exact question match
pub const EXACT_MATCH_SCORE: f64 = 10.0;

/// Points per keyword-token intersection member
const KEYWORD_WEIGHT: f64 = 2.0;

/// Points per query token contained in the normalized question
const TOKEN_CONTAINMENT_WEIGHT: f64 = 3.0;

/// Points per expansion string contained in the normalized question
const EXPANSION_WEIGHT: f64 = 2.0;

/// Score a candidate record against a query and its expansions.
///
/// Exact case-insensitive question equality short-circuits to
/// [`EXACT_MATCH_SCORE`]. Otherwise the score is additive: keyword
/// intersections, query-token containment in the normalized question, and
/// expansion-string containment. Never negative, no fixed upper bound.
///
/// Token containment counts once per token. Short tokens shared between
/// unrelated words can over-reward a candidate; the behavior is kept for
/// parity with the curated corpus the thresholds were tuned against.
pub fn score(query: &str, record: &FaqRecord, expansions: &[String]) -> f64 {
    let query = query.trim();

    if query.to_lowercase() == record.question.trim().to_lowercase() {
        return EXACT_MATCH_SCORE;
    }

    let tokens = normalize(query);
    let keywords: HashSet<String> = record.keyword_tokens().into_iter().collect();

    let mut total = 0.0;

    for token in &tokens {
        if keywords.contains(token) {
            total += KEYWORD_WEIGHT;
        }
        if record.normalized_question.contains(token.as_str()) {
            total += TOKEN_CONTAINMENT_WEIGHT;
        }
    }

    for expansion in expansions {
        if !expansion.is_empty() && record.normalized_question.contains(expansion.as_str()) {
            total += EXPANSION_WEIGHT;
        }
    }

    total
}
