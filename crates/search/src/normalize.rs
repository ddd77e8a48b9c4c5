//! Query and description normalization.
//!
//! Both sides of every comparison go through the same pipeline: trim,
//! lowercase, canonical decomposition, then drop combining diacritical marks.
//! "Maçã" and "MACA" normalize to the same "maca".
//!
//! [`NormalizedText`] also remembers which source character produced each
//! normalized character, so a span found in normalized text can be drawn on
//! the text the caller actually displays.

use unicode_normalization::char::decompose_canonical;

/// Normalize text for comparison.
///
/// ```
/// use catalog_search::normalize;
///
/// assert_eq!(normalize("  Pão de Açúcar "), "pao de acucar");
/// ```
pub fn normalize(text: &str) -> String {
    NormalizedText::new(text).text
}

/// Combining Diacritical Marks block.
fn is_diacritic(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

/// Normalized text with a map back to source character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    /// Source char index for each char of `text`
    origins: Vec<usize>,
    /// Source char index one past the last kept char and its marks
    source_end: usize,
}

impl NormalizedText {
    /// Normalize `source`, keeping the offset map.
    pub fn new(source: &str) -> Self {
        let mut chars: Vec<(char, usize)> = Vec::with_capacity(source.len());
        let mut source_len = 0;

        for (index, c) in source.chars().enumerate() {
            source_len = index + 1;
            for lower in c.to_lowercase() {
                decompose_canonical(lower, |d| {
                    if !is_diacritic(d) {
                        chars.push((d, index));
                    }
                });
            }
        }

        let start = chars
            .iter()
            .position(|(c, _)| !c.is_whitespace())
            .unwrap_or(chars.len());
        let end = chars
            .iter()
            .rposition(|(c, _)| !c.is_whitespace())
            .map_or(start, |i| i + 1);

        let kept = &chars[start..end];
        Self {
            text: kept.iter().map(|(c, _)| *c).collect(),
            origins: kept.iter().map(|(_, origin)| *origin).collect(),
            source_end: chars.get(end).map_or(source_len, |(_, origin)| *origin),
        }
    }

    /// The normalized text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.origins.len()
    }

    /// Whether nothing is left after normalization.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Character offset of the first occurrence of `needle`.
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.text
            .find(needle)
            .map(|byte| self.text[..byte].chars().count())
    }

    /// Whitespace-delimited tokens with their character offsets.
    pub fn tokens(&self) -> Vec<Token<'_>> {
        tokenize(&self.text)
    }

    /// Project a `[start, end)` span of normalized characters onto the
    /// source text. Returns `None` for empty or out-of-range spans.
    ///
    /// Dropped marks that follow the last char of the span are included.
    pub fn project(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        if start >= end || end > self.origins.len() {
            return None;
        }
        let source_start = self.origins[start];
        let source_end = self.origins.get(end).copied().unwrap_or(self.source_end);
        Some((source_start, source_end.max(source_start + 1)))
    }
}

/// A whitespace-delimited word and where it sits in its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The word itself
    pub text: &'a str,
    /// Character offset of the first char
    pub start: usize,
    /// Length in characters
    pub len: usize,
}

impl Token<'_> {
    /// Character offset one past the last char.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Split text on whitespace runs, tracking character offsets.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    // (byte offset, char offset) of the token being read
    let mut current: Option<(usize, usize)> = None;
    let mut position = 0;

    for (byte, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some((start_byte, start)) = current.take() {
                tokens.push(Token {
                    text: &text[start_byte..byte],
                    start,
                    len: position - start,
                });
            }
        } else if current.is_none() {
            current = Some((byte, position));
        }
        position += 1;
    }

    if let Some((start_byte, start)) = current {
        tokens.push(Token {
            text: &text[start_byte..],
            start,
            len: position - start,
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  BANANA Caturra  "), "banana caturra");
    }

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize("Relógio Elétrica Tênis"), "relogio eletrica tenis");
        assert_eq!(normalize("Maçã"), "maca");
    }

    #[test]
    fn test_normalize_decomposed_input() {
        // "e" followed by a combining acute accent
        assert_eq!(normalize("Cafe\u{0301}"), "cafe");
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n "), "");
    }

    #[test]
    fn test_normalize_keeps_inner_whitespace() {
        assert_eq!(normalize("a  b"), "a  b");
    }

    #[test]
    fn test_find_returns_char_offset() {
        let text = NormalizedText::new("Pão Francês");
        assert_eq!(text.find("frances"), Some(4));
        assert_eq!(text.find("queijo"), None);
    }

    #[test]
    fn test_project_through_trim_and_decomposition() {
        // Decomposed "é" occupies two source chars but one normalized char
        let text = NormalizedText::new("  Cafe\u{0301} Forte");
        assert_eq!(text.as_str(), "cafe forte");

        let start = text.find("forte").unwrap();
        assert_eq!(start, 5);
        assert_eq!(text.project(start, start + 5), Some((8, 13)));
        // The combining accent is part of the highlighted word
        assert_eq!(text.project(0, 4), Some((2, 7)));
    }

    #[test]
    fn test_project_trailing_mark() {
        let text = NormalizedText::new("Cafe\u{0301}  ");
        assert_eq!(text.project(0, 4), Some((0, 5)));
    }

    #[test]
    fn test_project_rejects_bad_spans() {
        let text = NormalizedText::new("abc");
        assert_eq!(text.project(2, 2), None);
        assert_eq!(text.project(1, 4), None);
    }

    #[test]
    fn test_tokenize_offsets() {
        let tokens = tokenize("cabo  usb-c\tpreto");
        let words: Vec<_> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(words, vec!["cabo", "usb-c", "preto"]);
        assert_eq!(tokens[1].start, 6);
        assert_eq!(tokens[1].end(), 11);
        assert_eq!(tokens[2].start, 12);
    }

    #[test]
    fn test_tokenize_multibyte() {
        let tokens = tokenize("ñandu ração");
        assert_eq!(tokens[1].text, "ração");
        assert_eq!(tokens[1].start, 6);
        assert_eq!(tokens[1].len, 5);
    }
}
