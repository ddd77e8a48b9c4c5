//! Search result types.

use serde::{Serialize, Serializer};
use std::sync::Arc;

/// How a product matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Code equals the query
    CodeExact,
    /// Code starts with the query
    CodePartial,
    /// Description contains the query, or whole query words
    DescriptionExact,
    /// Description words are close to query words
    DescriptionFuzzy,
    /// Description words share a root with query words
    DescriptionSemantic,
}

impl MatchKind {
    /// Tie-break priority when two results have equal scores (higher wins).
    pub fn priority(self) -> u8 {
        match self {
            Self::CodeExact => 5,
            Self::CodePartial => 4,
            Self::DescriptionExact => 3,
            Self::DescriptionFuzzy => 2,
            Self::DescriptionSemantic => 1,
        }
    }

    /// Short label for display next to a result.
    pub fn label(self) -> &'static str {
        match self {
            Self::CodeExact | Self::CodePartial => "Code",
            Self::DescriptionExact => "Description",
            Self::DescriptionFuzzy => "Similarity",
            Self::DescriptionSemantic => "Related",
        }
    }

    /// Whether the match came from the code rather than the description.
    pub fn is_code_match(self) -> bool {
        matches!(self, Self::CodeExact | Self::CodePartial)
    }
}

/// Character span `[start, end)` of `matched_text` to emphasize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightRange {
    /// First highlighted char
    pub start: usize,
    /// One past the last highlighted char
    pub end: usize,
}

impl HighlightRange {
    /// Create a range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// What a matcher found for one product, before ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Which matcher produced it
    pub kind: MatchKind,
    /// Ranking score
    pub score: f64,
    /// Highlight spans in the matched text
    pub ranges: Vec<HighlightRange>,
}

/// One ranked match.
#[derive(Debug, Serialize)]
#[serde(bound(serialize = "P: Serialize"))]
pub struct SearchResult<P> {
    /// The matched product
    #[serde(serialize_with = "serialize_arc")]
    pub product: Arc<P>,
    /// Ranking score (higher is better)
    pub score: f64,
    /// Which matcher produced this result
    pub kind: MatchKind,
    /// Text the highlight ranges index into (the code or the description)
    pub matched_text: String,
    /// Spans of `matched_text` that caused the match
    pub highlight_ranges: Vec<HighlightRange>,
}

// Manual impl: `P` itself need not be Clone behind the Arc.
impl<P> Clone for SearchResult<P> {
    fn clone(&self) -> Self {
        Self {
            product: Arc::clone(&self.product),
            score: self.score,
            kind: self.kind,
            matched_text: self.matched_text.clone(),
            highlight_ranges: self.highlight_ranges.clone(),
        }
    }
}

impl<P: PartialEq> PartialEq for SearchResult<P> {
    fn eq(&self, other: &Self) -> bool {
        self.product == other.product
            && self.score.to_bits() == other.score.to_bits()
            && self.kind == other.kind
            && self.matched_text == other.matched_text
            && self.highlight_ranges == other.highlight_ranges
    }
}

fn serialize_arc<P: Serialize, S: Serializer>(
    product: &Arc<P>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    P::serialize(product, serializer)
}

/// A run of `matched_text`, highlighted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The text of the run
    pub text: &'a str,
    /// Whether the run falls inside a highlight range
    pub highlighted: bool,
}

impl<P> SearchResult<P> {
    /// Split `matched_text` into plain and highlighted runs, in order.
    ///
    /// Ranges are sorted and overlapping ranges merged first, so every char
    /// appears in exactly one segment.
    pub fn highlight_segments(&self) -> Vec<Segment<'_>> {
        let text = self.matched_text.as_str();
        let char_len = text.chars().count();

        let mut ranges: Vec<HighlightRange> = self
            .highlight_ranges
            .iter()
            .map(|r| HighlightRange::new(r.start.min(char_len), r.end.min(char_len)))
            .filter(|r| r.start < r.end)
            .collect();
        ranges.sort_by_key(|r| (r.start, r.end));

        let mut merged: Vec<HighlightRange> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
                _ => merged.push(range),
            }
        }

        // Byte offset of every char boundary, including the end
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(text.len()))
            .collect();

        let mut segments = Vec::new();
        let mut cursor = 0;
        for range in merged {
            if range.start > cursor {
                segments.push(Segment {
                    text: &text[boundaries[cursor]..boundaries[range.start]],
                    highlighted: false,
                });
            }
            segments.push(Segment {
                text: &text[boundaries[range.start]..boundaries[range.end]],
                highlighted: true,
            });
            cursor = range.end;
        }
        if cursor < char_len {
            segments.push(Segment {
                text: &text[boundaries[cursor]..],
                highlighted: false,
            });
        }

        segments
    }
}
