//! Description matching.
//!
//! Four strategies run in a fixed order and the first one that produces a
//! match wins; later strategies are never evaluated for that product:
//!
//! 1. [`exact_substring`]: the whole query appears in the description
//! 2. [`word_exact`]: query words appear inside description words
//! 3. [`fuzzy`]: query words are close to description words by edit distance
//!    or bigram overlap
//! 4. [`semantic`]: query words share a crude root with description words
//!
//! Strategies report spans in normalized-description characters;
//! [`match_description`] projects them onto the original description.

use crate::config::SearchConfig;
use crate::fuzzy::{bigram_similarity, levenshtein_similarity, stem_root};
use crate::normalize::{NormalizedText, Token};
use crate::result::{HighlightRange, Match, MatchKind};
use tracing::trace;

/// Base score of a description containing the whole query.
pub const EXACT_SUBSTRING_BASE: f64 = 6_000.0;

/// Base score of a word-level exact match.
pub const WORD_EXACT_BASE: f64 = 5_000.0;

/// Weight of one query word contained in a description word.
const WORD_EXACT_WEIGHT: f64 = 200.0;

/// Weight of one fuzzy word match, scaled by its similarity.
const FUZZY_WEIGHT: f64 = 800.0;

/// Points for every query/description word pair sharing a root.
const SEMANTIC_PAIR_SCORE: f64 = 150.0;

/// A semantic match needs more than this many points.
const SEMANTIC_MIN_SCORE: f64 = 100.0;

/// Shortest query word considered by the word-level strategies.
const MIN_WORD_LEN: usize = 2;

/// Shortest query word considered by root matching.
const MIN_ROOT_WORD_LEN: usize = 3;

/// Everything a strategy needs to judge one description.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionContext<'a> {
    /// Normalized query
    pub query: &'a str,
    /// Query words
    pub query_tokens: &'a [Token<'a>],
    /// Normalized description
    pub description: &'a NormalizedText,
    /// Description words
    pub description_tokens: &'a [Token<'a>],
    /// Active configuration
    pub config: &'a SearchConfig,
}

/// One step of the description fallback chain.
pub type DescriptionStrategy = fn(&DescriptionContext<'_>) -> Option<Match>;

/// The fallback chain, in precedence order.
pub const STRATEGIES: [(&str, DescriptionStrategy); 4] = [
    ("exact_substring", exact_substring),
    ("word_exact", word_exact),
    ("fuzzy", fuzzy),
    ("semantic", semantic),
];

/// Run the strategy chain and return the first match.
///
/// Highlight ranges of the returned match index into the original
/// description. Empty descriptions never match.
pub fn match_description(ctx: &DescriptionContext<'_>) -> Option<Match> {
    if ctx.description.is_empty() || ctx.query.is_empty() {
        return None;
    }

    STRATEGIES.iter().find_map(|(name, strategy)| {
        let found = strategy(ctx)?;
        trace!(strategy = name, score = found.score, "Description matched");

        let ranges = found
            .ranges
            .iter()
            .filter_map(|r| ctx.description.project(r.start, r.end))
            .map(|(start, end)| HighlightRange::new(start, end))
            .collect();

        Some(Match { ranges, ..found })
    })
}

fn token_range(token: &Token<'_>) -> HighlightRange {
    HighlightRange::new(token.start, token.end())
}

/// The normalized description contains the normalized query verbatim.
///
/// Scores 6000 plus up to 1000 for the share of the description the query
/// covers, and highlights the first occurrence.
pub fn exact_substring(ctx: &DescriptionContext<'_>) -> Option<Match> {
    let start = ctx.description.find(ctx.query)?;
    let query_len = ctx.query.chars().count();
    let ratio = query_len as f64 / ctx.description.char_len() as f64;

    Some(Match {
        kind: MatchKind::DescriptionExact,
        score: EXACT_SUBSTRING_BASE + ratio * 1000.0,
        ranges: vec![HighlightRange::new(start, start + query_len)],
    })
}

/// Query words found inside description words.
///
/// Every (query word, description word) containment adds
/// `200 * query_len / word_len`, and the containing word is highlighted.
pub fn word_exact(ctx: &DescriptionContext<'_>) -> Option<Match> {
    let mut total = 0.0;
    let mut ranges = Vec::new();

    for query_word in ctx.query_tokens.iter().filter(|t| t.len >= MIN_WORD_LEN) {
        for word in ctx.description_tokens {
            if word.text.contains(query_word.text) {
                total += query_word.len as f64 / word.len as f64 * WORD_EXACT_WEIGHT;
                ranges.push(token_range(word));
            }
        }
    }

    (total > 0.0).then(|| Match {
        kind: MatchKind::DescriptionExact,
        score: WORD_EXACT_BASE + total,
        ranges,
    })
}

/// Query words close to some description word.
///
/// For each query word the most similar description word is kept if its
/// similarity reaches the threshold; similarity is the larger of the
/// edit-distance ratio and, when enabled, bigram overlap. The first word
/// wins ties. The match needs a total of at least `threshold * 1000`.
pub fn fuzzy(ctx: &DescriptionContext<'_>) -> Option<Match> {
    let threshold = ctx.config.fuzzy_threshold;
    let mut total = 0.0;
    let mut ranges = Vec::new();

    for query_word in ctx.query_tokens.iter().filter(|t| t.len >= MIN_WORD_LEN) {
        let mut best_score = 0.0;
        let mut best_word = None;

        for word in ctx.description_tokens {
            let edit = levenshtein_similarity(query_word.text, word.text);
            if edit > best_score && edit >= threshold {
                best_score = edit;
                best_word = Some(word);
            }

            if ctx.config.enable_ngram {
                let overlap = bigram_similarity(query_word.text, word.text);
                if overlap > best_score && overlap >= threshold {
                    best_score = overlap;
                    best_word = Some(word);
                }
            }
        }

        if let Some(word) = best_word {
            total += best_score * FUZZY_WEIGHT;
            ranges.push(token_range(word));
        }
    }

    (total > 0.0 && total >= threshold * 1000.0).then(|| Match {
        kind: MatchKind::DescriptionFuzzy,
        score: total,
        ranges,
    })
}

/// Query words sharing a crude root with description words.
///
/// Each pair whose roots contain one another adds 150 points; more than 100
/// points is a match. Nothing is highlighted.
pub fn semantic(ctx: &DescriptionContext<'_>) -> Option<Match> {
    if !ctx.config.enable_semantic {
        return None;
    }

    let mut total = 0.0;
    for query_word in ctx.query_tokens.iter().filter(|t| t.len >= MIN_ROOT_WORD_LEN) {
        let query_root = stem_root(query_word.text);
        for word in ctx.description_tokens {
            let root = stem_root(word.text);
            if root.contains(query_root) || query_root.contains(root) {
                total += SEMANTIC_PAIR_SCORE;
            }
        }
    }

    (total > SEMANTIC_MIN_SCORE).then(|| Match {
        kind: MatchKind::DescriptionSemantic,
        score: total,
        ranges: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize, tokenize};

    fn run(
        strategy: DescriptionStrategy,
        description: &str,
        query: &str,
        config: &SearchConfig,
    ) -> Option<Match> {
        let description = NormalizedText::new(description);
        let description_tokens = description.tokens();
        let query = normalize(query);
        let query_tokens = tokenize(&query);
        strategy(&DescriptionContext {
            query: &query,
            query_tokens: &query_tokens,
            description: &description,
            description_tokens: &description_tokens,
            config,
        })
    }

    fn chain(description: &str, query: &str, config: &SearchConfig) -> Option<Match> {
        run(match_description, description, query, config)
    }

    #[test]
    fn test_exact_substring() {
        let m = run(exact_substring, "BANANA CATURRA KG", "banana", &SearchConfig::default())
            .unwrap();
        assert_eq!(m.kind, MatchKind::DescriptionExact);
        assert!((m.score - (6000.0 + 6.0 / 17.0 * 1000.0)).abs() < 1e-9);
        assert_eq!(m.ranges, vec![HighlightRange::new(0, 6)]);
    }

    #[test]
    fn test_exact_substring_ignores_accents() {
        let m = run(exact_substring, "Pão de Açúcar", "acucar", &SearchConfig::default())
            .unwrap();
        assert_eq!(m.ranges, vec![HighlightRange::new(7, 13)]);
    }

    #[test]
    fn test_word_exact_scores_each_containment() {
        let m = run(word_exact, "Cabo USB-C Carregamento", "usb carrega", &SearchConfig::default())
            .unwrap();
        let expected = 5000.0 + 3.0 / 5.0 * 200.0 + 7.0 / 12.0 * 200.0;
        assert!((m.score - expected).abs() < 1e-9);
        assert_eq!(
            m.ranges,
            vec![HighlightRange::new(5, 10), HighlightRange::new(11, 23)]
        );
    }

    #[test]
    fn test_word_exact_skips_single_chars() {
        assert!(run(word_exact, "kit a b", "a", &SearchConfig::default()).is_none());
    }

    #[test]
    fn test_fuzzy_tolerates_typo() {
        let m = run(fuzzy, "BANANA CATURRA KG", "bananaa", &SearchConfig::default()).unwrap();
        assert_eq!(m.kind, MatchKind::DescriptionFuzzy);
        assert!((m.score - 6.0 / 7.0 * 800.0).abs() < 1e-9);
        assert_eq!(m.ranges, vec![HighlightRange::new(0, 6)]);
    }

    #[test]
    fn test_fuzzy_respects_threshold() {
        let config = SearchConfig {
            fuzzy_threshold: 0.9,
            ..SearchConfig::default()
        };
        assert!(run(fuzzy, "BANANA CATURRA KG", "bananaa", &config).is_none());
    }

    #[test]
    fn test_fuzzy_total_must_reach_threshold() {
        // One word at 6/7 similarity gives ~686 points, short of 0.8 * 1000
        let config = SearchConfig {
            fuzzy_threshold: 0.8,
            ..SearchConfig::default()
        };
        assert!(run(fuzzy, "BANANA CATURRA KG", "bananaa", &config).is_none());

        // Two such words clear it
        let m = run(fuzzy, "BANANA CATURRA KG", "bananaa caturrra", &config).unwrap();
        assert_eq!(m.ranges.len(), 2);
    }

    #[test]
    fn test_fuzzy_ngram_toggle() {
        // "aaab" vs "aab": edit similarity 3/4, identical bigram sets
        let with_ngram = run(fuzzy, "aab", "aaab", &SearchConfig::default()).unwrap();
        assert_eq!(with_ngram.score, 800.0);

        let without = run(
            fuzzy,
            "aab",
            "aaab",
            &SearchConfig {
                enable_ngram: false,
                ..SearchConfig::default()
            },
        )
        .unwrap();
        assert_eq!(without.score, 600.0);
        assert_eq!(without.ranges, with_ngram.ranges);
    }

    #[test]
    fn test_semantic_root_match() {
        let m = run(semantic, "Bananas Nanicas", "banana", &SearchConfig::default()).unwrap();
        assert_eq!(m.kind, MatchKind::DescriptionSemantic);
        assert_eq!(m.score, 150.0);
        assert!(m.ranges.is_empty());
    }

    #[test]
    fn test_semantic_disabled() {
        let config = SearchConfig {
            enable_semantic: false,
            ..SearchConfig::default()
        };
        assert!(run(semantic, "Bananas Nanicas", "banana", &config).is_none());
    }

    #[test]
    fn test_semantic_needs_long_words() {
        assert!(run(semantic, "pa pao", "pa", &SearchConfig::default()).is_none());
    }

    #[test]
    fn test_chain_first_strategy_wins() {
        // Substring wins even though word-level matching would also succeed
        let m = chain("BANANA CATURRA KG", "banana", &SearchConfig::default()).unwrap();
        assert!(m.score > EXACT_SUBSTRING_BASE);
    }

    #[test]
    fn test_chain_falls_through_to_semantic() {
        let config = SearchConfig {
            fuzzy_threshold: 0.9,
            ..SearchConfig::default()
        };
        let m = chain("BANANA CATURRA KG", "bananaa", &config).unwrap();
        assert_eq!(m.kind, MatchKind::DescriptionSemantic);
    }

    #[test]
    fn test_chain_projects_onto_original_text() {
        // Leading whitespace is trimmed by normalization but still counts in
        // the original description
        let m = chain("  Leite  Integral", "integral", &SearchConfig::default()).unwrap();
        assert_eq!(m.ranges, vec![HighlightRange::new(9, 17)]);
    }

    #[test]
    fn test_chain_word_ranges_with_irregular_spacing() {
        let m = chain("Leite\t\tIntegral  Longa Vida", "longa integral", &SearchConfig::default())
            .unwrap();
        assert_eq!(m.kind, MatchKind::DescriptionExact);
        assert_eq!(
            m.ranges,
            vec![HighlightRange::new(17, 22), HighlightRange::new(7, 15)]
        );
    }

    #[test]
    fn test_chain_empty_description() {
        assert!(chain("", "banana", &SearchConfig::default()).is_none());
        assert!(chain("   ", "banana", &SearchConfig::default()).is_none());
    }
}
