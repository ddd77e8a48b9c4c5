//! Result ranking.

use crate::result::SearchResult;
use std::cmp::Ordering;

/// Order two results: higher score first, then higher match priority.
///
/// Priority only breaks exact score ties.
pub fn compare_results<P>(a: &SearchResult<P>, b: &SearchResult<P>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.kind.priority().cmp(&a.kind.priority()))
}

/// Sort results best-first and keep at most `max_results`.
///
/// The sort is stable, so fully tied results keep catalog order.
pub fn rank<P>(mut results: Vec<SearchResult<P>>, max_results: usize) -> Vec<SearchResult<P>> {
    results.sort_by(compare_results);
    results.truncate(max_results);
    results
}
