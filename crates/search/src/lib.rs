//! In-memory product catalog search.
//!
//! This crate provides:
//! - Code matching (exact and prefix)
//! - Description matching through an ordered fallback chain: exact
//!   substring, word-level, fuzzy (Levenshtein and bigram), and root-based
//! - Diacritic-insensitive normalization with highlight spans mapped back to
//!   the original text
//! - Deterministic ranking and a bounded per-query result cache
//!
//! # Example
//!
//! ```
//! use catalog_search::{MatchKind, Product, SearchConfig, SearchEngine};
//!
//! let catalog = vec![
//!     Product::new("1595", "BANANA CATURRA KG", 5.49),
//!     Product::new("2001", "Maçã Fuji KG", 8.99),
//! ];
//! let mut engine = SearchEngine::new(catalog, SearchConfig::default());
//!
//! let results = engine.search("maca");
//! assert_eq!(results[0].product.code, "2001");
//! assert_eq!(results[0].kind, MatchKind::DescriptionExact);
//! ```

pub mod cache;
pub mod code;
pub mod config;
pub mod description;
mod engine;
mod error;
pub mod fuzzy;
pub mod normalize;
mod product;
mod ranking;
mod result;


pub use cache::{QueryCache, DEFAULT_CACHE_CAPACITY};
pub use config::SearchConfig;
pub use engine::SearchEngine;
pub use error::{Result, SearchError};
pub use fuzzy::{levenshtein_distance, ngram_similarity};
pub use normalize::normalize;
pub use product::{load_catalog_json, Product, Searchable};
pub use ranking::{compare_results, rank};
pub use result::{HighlightRange, Match, MatchKind, SearchResult, Segment};
