//! Code matching.
//!
//! Codes are compared lowercased but otherwise verbatim; they are numeric or
//! alphanumeric, so there are no diacritics to strip.

use crate::result::{HighlightRange, Match, MatchKind};

/// Score of a code that equals the query.
pub const CODE_EXACT_SCORE: f64 = 10_000.0;

/// Base score of a code that starts with the query.
pub const CODE_PARTIAL_BASE: f64 = 8_000.0;

/// Match a normalized query against a product code.
///
/// An exact code scores [`CODE_EXACT_SCORE`] and highlights the whole code.
/// A code that starts with the query scores between 8000 and 9000 in
/// proportion to how much of the code the query covers, and highlights the
/// covered prefix. Empty codes never match.
pub fn match_code(code: &str, query: &str) -> Option<Match> {
    if code.is_empty() || query.is_empty() {
        return None;
    }

    let lowered = code.to_lowercase();
    let code_len = code.chars().count();

    if lowered == query {
        return Some(Match {
            kind: MatchKind::CodeExact,
            score: CODE_EXACT_SCORE,
            ranges: vec![HighlightRange::new(0, code_len)],
        });
    }

    if lowered.starts_with(query) {
        let query_len = query.chars().count();
        let ratio = query_len as f64 / lowered.chars().count() as f64;
        return Some(Match {
            kind: MatchKind::CodePartial,
            score: CODE_PARTIAL_BASE + ratio * 1000.0,
            ranges: vec![HighlightRange::new(0, query_len.min(code_len))],
        });
    }

    None
}
