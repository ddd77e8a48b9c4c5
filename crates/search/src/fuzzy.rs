//! Fuzzy matching primitives.
//!
//! All lengths are measured in characters, never bytes.

use std::collections::HashSet;

/// Bigram size used by the n-gram similarity.
pub const NGRAM_SIZE: usize = 2;

/// Calculate Levenshtein edit distance between two strings.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 { return n; }
    if n == 0 { return m; }

    // Use two rows for space optimization
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Edit-distance similarity in `[0, 1]`: `(max_len - distance) / max_len`.
///
/// Two empty strings are identical and score 1.
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein_distance(a, b);
    (max_len - distance) as f64 / max_len as f64
}

/// Character n-grams of `text`, padded with `n - 1` spaces on each side.
///
/// The padding lets the first and last characters form their own n-grams,
/// so "ab" yields `" a"`, `"ab"`, `"b "` for bigrams.
pub fn ngrams(text: &str, n: usize) -> HashSet<String> {
    let n = n.max(1);
    let padding = std::iter::repeat(' ').take(n - 1);
    let padded: Vec<char> = padding
        .clone()
        .chain(text.chars())
        .chain(padding)
        .collect();

    padded
        .windows(n)
        .map(|window| window.iter().collect())
        .collect()
}

/// Jaccard similarity of the padded n-gram sets of two strings.
pub fn ngram_similarity(a: &str, b: &str, n: usize) -> f64 {
    let grams_a = ngrams(a, n);
    let grams_b = ngrams(b, n);

    if grams_a.is_empty() && grams_b.is_empty() {
        return 1.0;
    }
    if grams_a.is_empty() || grams_b.is_empty() {
        return 0.0;
    }

    let intersection = grams_a.intersection(&grams_b).count();
    let union = grams_a.union(&grams_b).count();
    intersection as f64 / union as f64
}

/// Bigram similarity, the n-gram flavour the description matcher uses.
pub fn bigram_similarity(a: &str, b: &str) -> f64 {
    ngram_similarity(a, b, NGRAM_SIZE)
}

/// Crude stem: the first `max(3, len - 2)` characters of a word.
///
/// "bananas" and "banana" share the root "banan"/"bana" relation that the
/// semantic matcher looks for. Words of three characters or fewer are their
/// own root.
pub fn stem_root(word: &str) -> &str {
    let len = word.chars().count();
    let keep = 3.max(len.saturating_sub(2));
    match word.char_indices().nth(keep) {
        Some((byte, _)) => &word[..byte],
        None => word,
    }
}
