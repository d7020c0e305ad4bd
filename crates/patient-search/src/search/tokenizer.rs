//! Free-text query splitting.

use crate::error::{SearchError, SearchResult};

/// Splits a query into its words.
///
/// Commas and spaces are equivalent separators. Empty fragments are dropped;
/// order and duplicates are kept. An absent query is an error, a blank one
/// simply has no parts.
pub fn query_parts(query: Option<&str>) -> SearchResult<Vec<&str>> {
    let query = query.ok_or_else(|| SearchError::invalid_argument("query must not be null"))?;

    Ok(query
        .split([',', ' '])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect())
}
