//! "Did you mean" title suggestions for queries that match nothing.

use crate::catalog::ItemRegistry;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Serialize;

/// Upper bound on offered suggestions.
pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub identity: String,
    pub title: String,
}

/// Ranks registry titles against `query` with the skim fuzzy matcher.
///
/// Every whitespace-separated token must match; the token scores are summed.
/// Equal scores keep registry order.
#[must_use]
pub fn suggest_titles(registry: &ItemRegistry, query: &str) -> Vec<Suggestion> {
    let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, usize)> = registry
        .movies()
        .iter()
        .enumerate()
        .filter_map(|(position, movie)| {
            tokens
                .iter()
                .map(|token| matcher.fuzzy_match(movie.title_folded(), token))
                .sum::<Option<i64>>()
                .map(|score| (score, position))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .filter_map(|(_, position)| registry.get(position))
        .map(|movie| Suggestion {
            identity: movie.identity.clone(),
            title: movie.title.clone(),
        })
        .collect()
}
