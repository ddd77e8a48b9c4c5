//! The search engine: catalog snapshot, configuration and result cache.

use crate::cache::{QueryCache, DEFAULT_CACHE_CAPACITY};
use crate::code::match_code;
use crate::config::SearchConfig;
use crate::description::{match_description, DescriptionContext};
use crate::normalize::{normalize, tokenize, NormalizedText, Token};
use crate::product::Searchable;
use crate::ranking::rank;
use crate::result::{Match, SearchResult};
use std::sync::Arc;
use tracing::debug;

/// Ranks a product catalog against free-text or code queries.
///
/// `search` needs `&mut self` because results are memoized per normalized
/// query. Share an engine across threads behind a lock.
///
/// ```
/// use catalog_search::{MatchKind, Product, SearchConfig, SearchEngine};
///
/// let catalog = vec![Product::new("1595", "BANANA CATURRA KG", 5.49)];
/// let mut engine = SearchEngine::new(catalog, SearchConfig::default());
///
/// let results = engine.search("1595");
/// assert_eq!(results[0].kind, MatchKind::CodeExact);
/// ```
#[derive(Debug)]
pub struct SearchEngine<P> {
    catalog: Vec<Arc<P>>,
    config: SearchConfig,
    cache: QueryCache<Vec<SearchResult<P>>>,
}

impl<P: Searchable> SearchEngine<P> {
    /// Build an engine over a catalog snapshot.
    ///
    /// The configuration is sanitized first; see [`SearchConfig::sanitized`].
    pub fn new(catalog: impl IntoIterator<Item = P>, config: SearchConfig) -> Self {
        let catalog: Vec<Arc<P>> = catalog.into_iter().map(Arc::new).collect();
        debug!(products = catalog.len(), "Search engine created");

        Self {
            catalog,
            config: config.sanitized(),
            cache: QueryCache::new(DEFAULT_CACHE_CAPACITY),
        }
    }

    /// Search the catalog.
    ///
    /// Queries that are blank once normalized (including lone combining
    /// marks) return nothing and are not cached. Each product yields at most
    /// one result: its code is tried first, then its description.
    pub fn search(&mut self, query: &str) -> Vec<SearchResult<P>> {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return Vec::new();
        }

        if let Some(cached) = self.cache.get(&normalized) {
            debug!(query = %normalized, results = cached.len(), "Search cache hit");
            return cached.clone();
        }

        let results = self.perform_search(&normalized);
        debug!(query = %normalized, results = results.len(), "Search cache miss");

        if let Some(evicted) = self.cache.insert(normalized, results.clone()) {
            debug!(evicted = %evicted, "Search cache full, evicted oldest query");
        }
        results
    }

    /// Swap in a new catalog snapshot and drop every cached result.
    pub fn replace_catalog(&mut self, catalog: impl IntoIterator<Item = P>) {
        self.catalog = catalog.into_iter().map(Arc::new).collect();
        self.cache.clear();
        debug!(products = self.catalog.len(), "Catalog replaced");
    }

    /// Drop every cached result.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        debug!("Search cache cleared");
    }

    /// The current catalog snapshot.
    pub fn catalog(&self) -> &[Arc<P>] {
        &self.catalog
    }

    /// The sanitized configuration in use.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of cached queries.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Whether results for `query` are cached.
    pub fn is_cached(&self, query: &str) -> bool {
        self.cache.contains(&normalize(query))
    }

    fn perform_search(&self, query: &str) -> Vec<SearchResult<P>> {
        let query_tokens = tokenize(query);

        let results = self
            .catalog
            .iter()
            .filter_map(|product| self.match_product(product, query, &query_tokens))
            .collect();

        rank(results, self.config.max_results)
    }

    fn match_product(
        &self,
        product: &Arc<P>,
        query: &str,
        query_tokens: &[Token<'_>],
    ) -> Option<SearchResult<P>> {
        if let Some(found) = match_code(product.code(), query) {
            return Some(into_result(product, found, product.code()));
        }

        let description = NormalizedText::new(product.description());
        let description_tokens = description.tokens();
        let ctx = DescriptionContext {
            query,
            query_tokens,
            description: &description,
            description_tokens: &description_tokens,
            config: &self.config,
        };

        match_description(&ctx).map(|found| into_result(product, found, product.description()))
    }
}

fn into_result<P>(product: &Arc<P>, found: Match, matched_text: &str) -> SearchResult<P> {
    SearchResult {
        product: Arc::clone(product),
        score: found.score,
        kind: found.kind,
        matched_text: matched_text.to_string(),
        highlight_ranges: found.ranges,
    }
}
