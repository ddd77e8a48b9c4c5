//! Terminal output for search results

use catalog_search::{MatchKind, Product, SearchResult};
use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;
use std::time::Duration;

/// Status lines for catalog and cache events.
///
/// Results and confirmations go to stdout, problems to stderr. Symbols are
/// colored only when the target stream supports it.
pub struct Status;

impl Status {
    /// A catalog finished loading
    pub fn catalog_loaded(products: usize) {
        Self::success(format!("{products} products loaded"));
    }

    /// The result cache was emptied
    pub fn cache_cleared() {
        Self::success("Cache cleared");
    }

    /// Print a success message
    pub fn success(message: impl Display) {
        println!("{} {message}", "✓".if_supports_color(Stream::Stdout, |s| s.green()));
    }

    /// Print an error message
    pub fn error(message: impl Display) {
        eprintln!("{} {message}", "✗".if_supports_color(Stream::Stderr, |s| s.red()));
    }

    /// Print a warning message
    pub fn warning(message: impl Display) {
        eprintln!("{} {message}", "⚠".if_supports_color(Stream::Stderr, |s| s.yellow()));
    }

    /// Print an info message
    pub fn info(message: impl Display) {
        println!("{} {message}", "ℹ".if_supports_color(Stream::Stdout, |s| s.blue()));
    }
}

/// Print the ranked results of one query
pub fn print_results(query: &str, results: &[SearchResult<Product>], took: Duration) {
    println!();
    println!(
        "{} {} {}",
        query.bold(),
        format!("{} result(s)", results.len()).dimmed(),
        format!("in {}", format_duration(took)).dimmed()
    );

    if results.is_empty() {
        println!("  {}", "No matching products".dimmed());
        return;
    }

    for (rank, result) in results.iter().enumerate() {
        let label = format!("{:<11}", result.kind.label());
        let label = match result.kind {
            MatchKind::CodeExact | MatchKind::CodePartial => label.green().to_string(),
            MatchKind::DescriptionExact => label.cyan().to_string(),
            MatchKind::DescriptionFuzzy => label.yellow().to_string(),
            MatchKind::DescriptionSemantic => label.magenta().to_string(),
        };

        println!(
            "{:>3}. {} {:>9.1}  {}",
            rank + 1,
            label,
            result.score,
            format_result_line(result)
        );
    }
}

/// One result as `code  description  price`, with matches in brackets
pub fn format_result_line(result: &SearchResult<Product>) -> String {
    let product = &result.product;
    let (code, description) = if result.kind.is_code_match() {
        (bracket_highlights(result), product.description.clone())
    } else {
        (product.code.clone(), bracket_highlights(result))
    };
    format!("{code}  {description}  {}", format_price(product.price))
}

/// Matched text with every highlighted run wrapped in `[` `]`
pub fn bracket_highlights(result: &SearchResult<Product>) -> String {
    result
        .highlight_segments()
        .into_iter()
        .map(|segment| {
            if segment.highlighted {
                format!("[{}]", segment.text)
            } else {
                segment.text.to_string()
            }
        })
        .collect()
}

/// Format a price with two decimals
pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

/// Format a duration for display
pub fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();
    if micros < 1000 {
        format!("{micros}µs")
    } else {
        format!("{:.1}ms", duration.as_secs_f64() * 1000.0)
    }
}
